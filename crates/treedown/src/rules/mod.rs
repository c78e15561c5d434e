//! Rule system for rendering shadow-tree nodes as Markdown.

mod markdown;
mod rule;

pub use markdown::markdown_rules;
pub use rule::{Filter, Rule};

use indexmap::IndexMap;

use crate::options::RenderOptions;
use crate::tree::NodeRef;

/// Collection of rendering rules
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in Markdown rules
    markdown_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in Markdown rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            markdown_rules: markdown_rules(),
        }
    }

    /// Add a custom rule
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Find the appropriate rule for a node. Text leaves and unmatched
    /// element kinds have no rule; the renderer treats both as passthrough.
    pub fn for_node<'a>(&'a self, node: &NodeRef, options: &RenderOptions) -> Option<&'a Rule> {
        let kind = node.kind()?;

        // Check custom rules first
        for rule in self.custom_rules.values() {
            if rule.filter.matches(kind, node, options) {
                return Some(rule);
            }
        }

        // Check built-in rules
        self.markdown_rules
            .iter()
            .find(|rule| rule.filter.matches(kind, node, options))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
