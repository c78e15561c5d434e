//! The Markdown host adapter.
//!
//! [`MarkdownHost`] owns one render call's shadow tree and implements the
//! engine's [`HostConfig`] over arena node ids. Most of the contract's
//! surface stays at the trait defaults; the behavioral subset is context
//! propagation, instance creation, the mutation operations, text updates,
//! and the commit publication in `reset_after_commit`.

use treedown_reconciler::{EventPriority, Handle, HostConfig, Props, TimeoutId};

use crate::signal::CommitPublisher;
use crate::tree::{MarkdownTree, NodeId};
use crate::utilities::is_text_container;

/// Host context handed down the tree during mounting. Flags whether the
/// current subtree is a text-only region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostContext {
    pub inside_text: bool,
}

/// Host adapter maintaining the shadow tree for one render call.
pub struct MarkdownHost {
    tree: MarkdownTree,
    root: NodeId,
    publisher: Option<CommitPublisher>,
    priority: EventPriority,
    next_timeout: i64,
}

impl MarkdownHost {
    /// Create a host with a fresh shadow tree. The publisher fires from
    /// `reset_after_commit` once the first commit settles.
    pub fn new(publisher: CommitPublisher) -> Self {
        let tree = MarkdownTree::new();
        let root = tree.root();
        Self {
            tree,
            root,
            publisher: Some(publisher),
            priority: EventPriority::NoPriority,
            next_timeout: 0,
        }
    }

    /// The shadow-tree root, used as the engine's container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &MarkdownTree {
        &self.tree
    }
}

fn node_id(handle: Handle<NodeId, NodeId>) -> NodeId {
    match handle {
        Handle::Element(id) | Handle::Text(id) => id,
    }
}

impl HostConfig for MarkdownHost {
    type Container = NodeId;
    type Instance = NodeId;
    type TextInstance = NodeId;
    type HostContext = HostContext;

    fn root_host_context(&self, _container: NodeId) -> HostContext {
        HostContext { inside_text: false }
    }

    fn child_host_context(&self, parent: &HostContext, kind: &str) -> Option<HostContext> {
        let inside_text = parent.inside_text || is_text_container(kind);
        // `None` keeps the parent context alive; a fresh context only exists
        // at the boundary where the flag actually flips.
        (inside_text != parent.inside_text).then_some(HostContext { inside_text })
    }

    fn create_instance(&mut self, kind: &str, props: &Props, context: &HostContext) -> NodeId {
        let id = self.tree.create_element(kind, props.clone());
        tracing::trace!(kind, inside_text = context.inside_text, "createInstance");
        id
    }

    fn create_text_instance(&mut self, text: &str, _context: &HostContext) -> NodeId {
        let id = self.tree.create_text(text);
        tracing::trace!(text, "createTextInstance");
        id
    }

    /// Always `false`: the serializer needs real text leaves to interleave
    /// with markup-producing siblings.
    fn should_set_text_content(&self, _kind: &str, _props: &Props) -> bool {
        false
    }

    fn append_initial_child(&mut self, parent: NodeId, child: Handle<NodeId, NodeId>) {
        self.tree.append(parent, node_id(child));
    }

    fn append_child(&mut self, parent: NodeId, child: Handle<NodeId, NodeId>) {
        self.tree.append(parent, node_id(child));
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: Handle<NodeId, NodeId>,
        before: Handle<NodeId, NodeId>,
    ) {
        self.tree.insert_before(parent, node_id(child), node_id(before));
    }

    fn remove_child(&mut self, parent: NodeId, child: Handle<NodeId, NodeId>) {
        self.tree.remove(parent, node_id(child));
    }

    // Container-granularity mutations are the same arena operations; the
    // engine's contract keeps them as distinct entry points.

    fn append_child_to_container(&mut self, container: NodeId, child: Handle<NodeId, NodeId>) {
        self.tree.append(container, node_id(child));
    }

    fn insert_in_container_before(
        &mut self,
        container: NodeId,
        child: Handle<NodeId, NodeId>,
        before: Handle<NodeId, NodeId>,
    ) {
        self.tree
            .insert_before(container, node_id(child), node_id(before));
    }

    fn remove_child_from_container(&mut self, container: NodeId, child: Handle<NodeId, NodeId>) {
        self.tree.remove(container, node_id(child));
    }

    fn clear_container(&mut self, container: NodeId) {
        self.tree.clear_children(container);
    }

    fn commit_text_update(&mut self, text_instance: NodeId, _old_text: &str, new_text: &str) {
        self.tree.set_text(text_instance, new_text);
    }

    /// Publish the settled tree. Nothing is computed here; serialization
    /// happens on the caller's side of the signal.
    fn reset_after_commit(&mut self, container: NodeId) {
        tracing::debug!(?container, "resetAfterCommit");
        if let Some(publisher) = self.publisher.take() {
            publisher.publish(container);
        }
    }

    fn set_current_update_priority(&mut self, priority: EventPriority) {
        self.priority = priority;
    }

    fn get_current_update_priority(&self) -> EventPriority {
        self.priority
    }

    fn resolve_update_priority(&self) -> EventPriority {
        if self.priority != EventPriority::NoPriority {
            self.priority
        } else {
            EventPriority::Default
        }
    }

    fn schedule_timeout(&mut self, delay_ms: i64) -> TimeoutId {
        // The delay is not interpreted; negative values are accepted as-is.
        self.next_timeout += 1;
        tracing::trace!(delay_ms, id = self.next_timeout, "scheduleTimeout");
        TimeoutId(self.next_timeout)
    }

    fn hide_text_instance(&mut self, text_instance: NodeId) {
        self.tree.set_text(text_instance, "");
    }

    fn unhide_text_instance(&mut self, text_instance: NodeId, text: &str) {
        self.tree.set_text(text_instance, text);
    }
}
