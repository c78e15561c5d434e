//! The shadow tree: an arena of element nodes and text leaves.
//!
//! Nodes live in a `Vec` and reference each other by [`NodeId`] index, with
//! an explicit parent index per node. The arena is the single mutation
//! surface; every insert detaches the child from its previous parent first,
//! so each child has exactly one owner and parent back-references always
//! agree with the owning `children` list.

use treedown_reconciler::Props;

/// Index of a node in a [`MarkdownTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The two node kinds: an element with a kind string and props, or a
/// literal text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element { kind: String, props: Props },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena storage for one render call's shadow tree. Created with a `"root"`
/// element already in place; never shared across render calls.
#[derive(Debug)]
pub struct MarkdownTree {
    nodes: Vec<Node>,
}

impl MarkdownTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Element {
                    kind: "root".to_string(),
                    props: Props::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root element, fixed for the lifetime of the tree.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn create_element(&mut self, kind: &str, props: Props) -> NodeId {
        self.push(NodeData::Element {
            kind: kind.to_string(),
            props,
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to the end of `parent`'s children.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `child` in front of `before` among `parent`'s children. When
    /// `before` is not a child of `parent`, falls back to append.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|&id| id == before) {
            Some(index) => children.insert(index, child),
            None => children.push(child),
        }
        self.nodes[child.0].parent = Some(parent);
    }

    /// Remove `child` from `parent`. A `child` not under `parent` is left
    /// untouched.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        if let Some(index) = children.iter().position(|&id| id == child) {
            children.remove(index);
            self.nodes[child.0].parent = None;
        }
    }

    /// Drop all of `parent`'s children.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Replace a text leaf's content in place. No-op on element nodes.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let NodeData::Text(current) = &mut self.nodes[id.0].data {
            current.clear();
            current.push_str(text);
        }
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent {
            self.remove(parent, child);
        }
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// The element kind, or `None` for text leaves.
    pub fn kind(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { kind, .. } => Some(kind),
            NodeData::Text(_) => None,
        }
    }

    /// The literal text, or `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    pub fn props(&self, id: NodeId) -> Option<&Props> {
        match &self.nodes[id.0].data {
            NodeData::Element { props, .. } => Some(props),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }
}

impl Default for MarkdownTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only view of one node with tree context, used by serializer rules
/// for parent and sibling lookups.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a MarkdownTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn new(tree: &'a MarkdownTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a MarkdownTree {
        self.tree
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.tree.kind(self.id)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.tree.data(self.id), NodeData::Text(_))
    }

    pub fn text(&self) -> Option<&'a str> {
        self.tree.text(self.id)
    }

    /// A string prop by name; non-string props read as absent.
    pub fn prop_str(&self, name: &str) -> Option<&'a str> {
        self.tree
            .props(self.id)
            .and_then(|props| props.get(name))
            .and_then(|value| value.as_str())
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree
            .parent(self.id)
            .map(|parent| NodeRef::new(self.tree, parent))
    }

    /// Kind of the immediate parent. Positional rules (`li` under `ol`,
    /// `tr` under `thead`) consult exactly this, never deeper ancestors.
    pub fn parent_kind(&self) -> Option<&'a str> {
        self.parent().and_then(|parent| parent.kind())
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|child| !child.is_text())
    }
}
