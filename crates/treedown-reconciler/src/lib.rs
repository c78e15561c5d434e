//! # treedown-reconciler
//!
//! A generic tree-reconciliation engine. Callers describe the tree they want
//! as an [`Element`] value; a host adapter implements [`HostConfig`] to own
//! the concrete nodes; the [`Reconciler`] turns descriptions into the
//! minimal host mutations that make the concrete tree match.
//!
//! The engine is mutation-based (no persistence or hydration modes) and
//! single-threaded: one reconciler, one host, one logical thread of control.
//! Updates are scheduled with [`Reconciler::update_container`] and settle on
//! flush, after which the host's `reset_after_commit` sees the finished tree.
//!
//! ## Example
//!
//! ```
//! use treedown_reconciler::Element;
//!
//! let doc = Element::new("doc")
//!     .child(Element::new("p").child(Element::text("Hello World")));
//! assert_eq!(doc.kind(), Some("doc"));
//! ```

mod element;
mod host;
mod reconciler;

pub use element::{Element, PropValue, Props};
pub use host::{EventPriority, Handle, HostConfig, TimeoutId};
pub use reconciler::{Reconciler, RootId};

/// Error type for reconciliation operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("unknown root container: {0}")]
    UnknownRoot(usize),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
