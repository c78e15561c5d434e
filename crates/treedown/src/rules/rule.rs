//! Rule and Filter types for Markdown rendering.

use crate::options::RenderOptions;
use crate::renderer::MarkdownRenderer;
use crate::tree::NodeRef;

/// Type alias for replacement functions. A replacement receives the
/// renderer (for options and for re-rendering individual children), the
/// node being replaced, and the node's already-rendered children.
pub type ReplacementFn =
    Box<dyn Fn(&MarkdownRenderer, &NodeRef, &str) -> String + Send + Sync>;

/// A filter determines which elements a rule applies to
pub enum Filter {
    /// Match a single element kind
    TagName(String),
    /// Match any of multiple element kinds
    TagNames(Vec<String>),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&str, &NodeRef, &RenderOptions) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single kind
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_string())
    }

    /// Create a filter for multiple kinds
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_string()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &NodeRef, &RenderOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element
    pub fn matches(&self, kind: &str, node: &NodeRef, options: &RenderOptions) -> bool {
        match self {
            Filter::TagName(name) => kind == name,
            Filter::TagNames(names) => names.iter().any(|name| kind == name),
            Filter::Predicate(f) => f(kind, node, options),
        }
    }
}

/// A rule defines how to render a matched element as Markdown
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&MarkdownRenderer, &NodeRef, &str) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single kind
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&MarkdownRenderer, &NodeRef, &str) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple kinds
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&MarkdownRenderer, &NodeRef, &str) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, renderer: &MarkdownRenderer, node: &NodeRef, content: &str) -> String {
        (self.replacement)(renderer, node, content)
    }
}
