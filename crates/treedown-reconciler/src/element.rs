//! Declarative element descriptions.
//!
//! An [`Element`] describes what a tree should look like; it never touches a
//! host directly. The [`Reconciler`](crate::Reconciler) turns descriptions
//! into host mutation calls.

use indexmap::IndexMap;

/// A scalar prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl PropValue {
    /// Get the string content, if this is a string prop.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Str(s) => f.write_str(s),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

/// Props are insertion-ordered so that anything derived from them is
/// reproducible run to run.
pub type Props = IndexMap<String, PropValue>;

/// A declarative description of a tree node: either an element with a kind,
/// props and children, or a literal text segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node {
        kind: String,
        props: Props,
        children: Vec<Element>,
    },
    Text(String),
}

impl Element {
    /// Create an element description with no props and no children.
    pub fn new(kind: &str) -> Self {
        Element::Node {
            kind: kind.to_string(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Create a literal text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    /// Set a prop. No-op on text segments.
    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        if let Element::Node { props, .. } = &mut self {
            props.insert(name.to_string(), value.into());
        }
        self
    }

    /// Append a child description. No-op on text segments.
    pub fn child(mut self, child: Element) -> Self {
        if let Element::Node { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append several child descriptions. No-op on text segments.
    pub fn children(mut self, iter: impl IntoIterator<Item = Element>) -> Self {
        if let Element::Node { children, .. } = &mut self {
            children.extend(iter);
        }
        self
    }

    /// The element kind, or `None` for text segments.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Element::Node { kind, .. } => Some(kind),
            Element::Text(_) => None,
        }
    }

    /// The literal text, or `None` for elements.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Element::Text(text) => Some(text),
            Element::Node { .. } => None,
        }
    }
}
