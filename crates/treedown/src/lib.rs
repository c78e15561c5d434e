//! # treedown
//!
//! Render declarative element trees to Markdown.
//!
//! A description built from [`Element`] values is handed to the generic
//! reconciliation engine (`treedown-reconciler`), which drives the
//! [`MarkdownHost`] adapter to build a shadow tree; once the commit settles,
//! the [`MarkdownRenderer`] walks the tree and emits Markdown according to
//! a per-kind rule table.
//!
//! ## Example
//!
//! ```rust
//! use treedown::{render_to_markdown, Element};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let doc = Element::new("h1").child(Element::text("Hello World"));
//! let markdown = render_to_markdown(doc).await.unwrap();
//! assert_eq!(markdown, "# Hello World\n\n");
//! # });
//! ```
//!
//! The renderer can also be driven directly over a hand-built shadow tree:
//!
//! ```rust
//! use treedown::{MarkdownRenderer, MarkdownTree, Props};
//!
//! let mut tree = MarkdownTree::new();
//! let p = tree.create_element("p", Props::new());
//! let text = tree.create_text("plain");
//! tree.append(tree.root(), p);
//! tree.append(p, text);
//!
//! let renderer = MarkdownRenderer::new();
//! assert_eq!(renderer.render(&tree, tree.root()), "plain\n\n");
//! ```

mod host;
mod options;
mod render;
mod renderer;
mod rules;
mod signal;
mod tree;
mod utilities;

pub use host::{HostContext, MarkdownHost};
pub use options::{OrderedListStyle, RenderOptions};
pub use render::{render_to_markdown, render_to_markdown_with, RenderError};
pub use renderer::MarkdownRenderer;
pub use rules::{markdown_rules, Filter, Rule, Rules};
pub use signal::{commit_channel, CommitPublisher, CommitSignal};
pub use tree::{MarkdownTree, NodeData, NodeId, NodeRef};
pub use utilities::*;

pub use treedown_reconciler::{Element, PropValue, Props};
