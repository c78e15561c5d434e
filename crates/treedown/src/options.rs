//! Configuration options for Markdown rendering.

/// How ordered-list items are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderedListStyle {
    /// Mark every item `1. ` and leave the numbering to the downstream
    /// Markdown renderer (CommonMark renderers renumber sequential items).
    #[default]
    Literal,
    /// Number items by their position among the parent's `li` children
    /// (`1. `, `2. `, ...).
    Numbered,
}

/// Options for the Markdown renderer
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Ordered-list numbering style
    pub ordered_list_style: OrderedListStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet_list_marker: '-',
            fence: "```".to_string(),
            ordered_list_style: OrderedListStyle::Literal,
        }
    }
}
