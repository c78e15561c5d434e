//! The Markdown renderer: walks a settled shadow tree and emits text.

use crate::options::RenderOptions;
use crate::rules::{Rule, Rules};
use crate::tree::{MarkdownTree, NodeId, NodeRef};

/// Renders shadow-tree nodes to Markdown through the rule registry.
pub struct MarkdownRenderer {
    options: RenderOptions,
    rules: Rules,
}

impl MarkdownRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Add a custom rule, checked before the built-in rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Render the subtree rooted at `id` to Markdown.
    pub fn render(&self, tree: &MarkdownTree, id: NodeId) -> String {
        self.render_node(&NodeRef::new(tree, id))
    }

    /// Render one node: children first, in order, then the node's own rule
    /// applied to the concatenation. Text leaves contribute their literal
    /// text unescaped; element kinds without a rule pass their children
    /// through unchanged.
    pub fn render_node(&self, node: &NodeRef) -> String {
        if let Some(text) = node.text() {
            return text.to_string();
        }

        let content: String = node
            .children()
            .map(|child| self.render_node(&child))
            .collect();

        match self.rules.for_node(node, &self.options) {
            Some(rule) => rule.replace(self, node, &content),
            None => content,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
