//! The reconciliation engine.
//!
//! [`Reconciler`] owns a host adapter and, per root container, a record of
//! the committed tree. `update_container` schedules a render; `flush` yields
//! to the scheduler once and then commits, so callers observe the same
//! "request now, settle on the next tick" shape the engine's batching
//! implies. Diffing is positional: same-kind elements update in place, kind
//! mismatches replace the child in its slot, length differences append or
//! remove at the tail.

use crate::element::{Element, Props};
use crate::host::{Handle, HostConfig};
use crate::{ReconcileError, Result};

/// Identifies a root container registered with [`Reconciler::create_container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootId(pub(crate) usize);

/// The committed record of one mounted node.
enum Fiber<H: HostConfig> {
    Element {
        kind: String,
        props: Props,
        instance: H::Instance,
        children: Vec<Fiber<H>>,
    },
    Text {
        text: String,
        instance: H::TextInstance,
    },
}

impl<H: HostConfig> Fiber<H> {
    fn handle(&self) -> Handle<H::Instance, H::TextInstance> {
        match self {
            Fiber::Element { instance, .. } => Handle::Element(*instance),
            Fiber::Text { instance, .. } => Handle::Text(*instance),
        }
    }
}

/// Where a child attaches: the root container or an interior instance. The
/// engine's contract distinguishes the two even though many hosts treat them
/// identically.
enum ParentSlot<H: HostConfig> {
    Container(H::Container),
    Instance(H::Instance),
}

impl<H: HostConfig> Clone for ParentSlot<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: HostConfig> Copy for ParentSlot<H> {}

struct RootState<H: HostConfig> {
    container: H::Container,
    context: H::HostContext,
    mounted: Option<Fiber<H>>,
    /// `Some(None)` means an unmount is scheduled.
    pending: Option<Option<Element>>,
}

/// Drives a [`HostConfig`] from declarative element descriptions.
pub struct Reconciler<H: HostConfig> {
    host: H,
    roots: Vec<RootState<H>>,
}

impl<H: HostConfig> Reconciler<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            roots: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Register a root container and capture its host context.
    pub fn create_container(&mut self, container: H::Container) -> RootId {
        let context = self.host.root_host_context(container);
        self.roots.push(RootState {
            container,
            context,
            mounted: None,
            pending: None,
        });
        let root = RootId(self.roots.len() - 1);
        tracing::debug!(root = root.0, ?container, "container registered");
        root
    }

    /// Schedule a render of `element` into `root`. `None` unmounts the
    /// current tree. The actual host mutations happen on flush.
    pub fn update_container(&mut self, root: RootId, element: Option<Element>) -> Result<()> {
        let state = self
            .roots
            .get_mut(root.0)
            .ok_or(ReconcileError::UnknownRoot(root.0))?;
        state.pending = Some(element);
        tracing::debug!(root = root.0, "update scheduled");
        Ok(())
    }

    /// Yield to the scheduler once, then commit the pending update.
    pub async fn flush(&mut self, root: RootId) -> Result<()> {
        tokio::task::yield_now().await;
        self.flush_sync(root)
    }

    /// Commit the pending update immediately. A root with nothing pending is
    /// left untouched.
    pub fn flush_sync(&mut self, root: RootId) -> Result<()> {
        let (container, update) = {
            let state = self
                .roots
                .get_mut(root.0)
                .ok_or(ReconcileError::UnknownRoot(root.0))?;
            match state.pending.take() {
                Some(update) => (state.container, update),
                None => return Ok(()),
            }
        };
        let context = self.roots[root.0].context.clone();
        let mounted = self.roots[root.0].mounted.take();

        let previous = self.host.get_current_update_priority();
        let resolved = self.host.resolve_update_priority();
        self.host.set_current_update_priority(resolved);
        self.host.prepare_for_commit(container);

        let next = match update {
            Some(element) => Some(Self::reconcile_child(
                &mut self.host,
                ParentSlot::Container(container),
                mounted,
                element,
                &context,
            )),
            None => {
                self.host.clear_container(container);
                if let Some(fiber) = mounted {
                    Self::detach_tree(&mut self.host, fiber);
                }
                None
            }
        };

        self.host.reset_after_commit(container);
        self.host.set_current_update_priority(previous);
        self.roots[root.0].mounted = next;
        tracing::debug!(root = root.0, "commit flushed");
        Ok(())
    }

    /// Reconcile one child slot: mount, update in place, or replace.
    fn reconcile_child(
        host: &mut H,
        slot: ParentSlot<H>,
        old: Option<Fiber<H>>,
        element: Element,
        context: &H::HostContext,
    ) -> Fiber<H> {
        let Some(old_fiber) = old else {
            let fiber = Self::mount(host, element, context);
            Self::attach(host, slot, fiber.handle(), None);
            return fiber;
        };

        match (old_fiber, element) {
            (Fiber::Text { text: old_text, instance }, Element::Text(new_text)) => {
                if old_text != new_text {
                    host.commit_text_update(instance, &old_text, &new_text);
                }
                Fiber::Text {
                    text: new_text,
                    instance,
                }
            }
            (
                Fiber::Element {
                    kind: old_kind,
                    props: old_props,
                    instance,
                    children: old_children,
                },
                Element::Node {
                    kind,
                    props,
                    children,
                },
            ) if old_kind == kind => {
                if old_props != props
                    && host.prepare_update(instance, &kind, &old_props, &props)
                {
                    host.commit_update(instance, &kind, &old_props, &props);
                }

                let child_context = match host.child_host_context(context, &kind) {
                    Some(changed) => changed,
                    None => context.clone(),
                };
                let child_slot = ParentSlot::Instance(instance);
                let mut old_iter = old_children.into_iter();
                let mut next_children = Vec::with_capacity(children.len());
                for child in children {
                    match old_iter.next() {
                        Some(old_child) => next_children.push(Self::reconcile_child(
                            host,
                            child_slot,
                            Some(old_child),
                            child,
                            &child_context,
                        )),
                        None => {
                            let fiber = Self::mount(host, child, &child_context);
                            Self::attach(host, child_slot, fiber.handle(), None);
                            next_children.push(fiber);
                        }
                    }
                }
                for leftover in old_iter {
                    Self::remove_fiber(host, child_slot, leftover);
                }

                Fiber::Element {
                    kind,
                    props,
                    instance,
                    children: next_children,
                }
            }
            (old_fiber, element) => {
                // Kind changed (or node/text flipped): mount the replacement
                // into the old slot, then drop the old subtree.
                let fiber = Self::mount(host, element, context);
                Self::attach(host, slot, fiber.handle(), Some(old_fiber.handle()));
                Self::remove_fiber(host, slot, old_fiber);
                fiber
            }
        }
    }

    /// Build host instances for a fresh description, leaf contexts resolved
    /// top-down, children attached with `append_initial_child`.
    fn mount(host: &mut H, element: Element, context: &H::HostContext) -> Fiber<H> {
        match element {
            Element::Text(text) => {
                let instance = host.create_text_instance(&text, context);
                Fiber::Text { text, instance }
            }
            Element::Node {
                kind,
                props,
                children,
            } => {
                let instance = host.create_instance(&kind, &props, context);
                let mut mounted = Vec::new();
                if !host.should_set_text_content(&kind, &props) {
                    let child_context = match host.child_host_context(context, &kind) {
                        Some(changed) => changed,
                        None => context.clone(),
                    };
                    mounted.reserve(children.len());
                    for child in children {
                        let fiber = Self::mount(host, child, &child_context);
                        host.append_initial_child(instance, fiber.handle());
                        mounted.push(fiber);
                    }
                }
                host.finalize_initial_children(instance, &kind, &props);
                Fiber::Element {
                    kind,
                    props,
                    instance,
                    children: mounted,
                }
            }
        }
    }

    fn attach(
        host: &mut H,
        slot: ParentSlot<H>,
        child: Handle<H::Instance, H::TextInstance>,
        before: Option<Handle<H::Instance, H::TextInstance>>,
    ) {
        match (slot, before) {
            (ParentSlot::Container(container), Some(before)) => {
                host.insert_in_container_before(container, child, before)
            }
            (ParentSlot::Container(container), None) => {
                host.append_child_to_container(container, child)
            }
            (ParentSlot::Instance(parent), Some(before)) => {
                host.insert_before(parent, child, before)
            }
            (ParentSlot::Instance(parent), None) => host.append_child(parent, child),
        }
    }

    fn remove_fiber(host: &mut H, slot: ParentSlot<H>, fiber: Fiber<H>) {
        match slot {
            ParentSlot::Container(container) => {
                host.remove_child_from_container(container, fiber.handle())
            }
            ParentSlot::Instance(parent) => host.remove_child(parent, fiber.handle()),
        }
        Self::detach_tree(host, fiber);
    }

    /// Notify the host about every element instance in a dropped subtree,
    /// children before parents.
    fn detach_tree(host: &mut H, fiber: Fiber<H>) {
        if let Fiber::Element {
            instance, children, ..
        } = fiber
        {
            for child in children {
                Self::detach_tree(host, child);
            }
            host.detach_deleted_instance(instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EventPriority, TimeoutId};

    /// Records every host call as a line, with `usize` handles.
    struct TestHost {
        log: Vec<String>,
        next_id: usize,
        priority: EventPriority,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                log: Vec::new(),
                next_id: 0,
                priority: EventPriority::NoPriority,
            }
        }

        fn fresh_id(&mut self) -> usize {
            self.next_id += 1;
            self.next_id
        }
    }

    fn id_of(handle: Handle<usize, usize>) -> usize {
        match handle {
            Handle::Element(id) | Handle::Text(id) => id,
        }
    }

    /// Context tracks whether we are inside a "list" subtree, so reuse can
    /// be observed: the flag only changes at the list boundary.
    impl HostConfig for TestHost {
        type Container = usize;
        type Instance = usize;
        type TextInstance = usize;
        type HostContext = bool;

        fn root_host_context(&self, _container: usize) -> bool {
            false
        }

        fn child_host_context(&self, parent: &bool, kind: &str) -> Option<bool> {
            let inside = *parent || kind == "list";
            (inside != *parent).then_some(inside)
        }

        fn create_instance(&mut self, kind: &str, _props: &Props, context: &bool) -> usize {
            let id = self.fresh_id();
            self.log.push(format!("create {kind} #{id} inside={context}"));
            id
        }

        fn create_text_instance(&mut self, text: &str, _context: &bool) -> usize {
            let id = self.fresh_id();
            self.log.push(format!("create-text {text:?} #{id}"));
            id
        }

        fn should_set_text_content(&self, _kind: &str, _props: &Props) -> bool {
            false
        }

        fn append_initial_child(&mut self, parent: usize, child: Handle<usize, usize>) {
            self.log
                .push(format!("append-initial #{parent} <- #{}", id_of(child)));
        }

        fn append_child(&mut self, parent: usize, child: Handle<usize, usize>) {
            self.log.push(format!("append #{parent} <- #{}", id_of(child)));
        }

        fn insert_before(
            &mut self,
            parent: usize,
            child: Handle<usize, usize>,
            before: Handle<usize, usize>,
        ) {
            self.log.push(format!(
                "insert #{parent} <- #{} before #{}",
                id_of(child),
                id_of(before)
            ));
        }

        fn remove_child(&mut self, parent: usize, child: Handle<usize, usize>) {
            self.log.push(format!("remove #{parent} -> #{}", id_of(child)));
        }

        fn append_child_to_container(&mut self, container: usize, child: Handle<usize, usize>) {
            self.log
                .push(format!("container-append @{container} <- #{}", id_of(child)));
        }

        fn insert_in_container_before(
            &mut self,
            container: usize,
            child: Handle<usize, usize>,
            before: Handle<usize, usize>,
        ) {
            self.log.push(format!(
                "container-insert @{container} <- #{} before #{}",
                id_of(child),
                id_of(before)
            ));
        }

        fn remove_child_from_container(&mut self, container: usize, child: Handle<usize, usize>) {
            self.log
                .push(format!("container-remove @{container} -> #{}", id_of(child)));
        }

        fn clear_container(&mut self, container: usize) {
            self.log.push(format!("clear @{container}"));
        }

        fn prepare_update(
            &mut self,
            instance: usize,
            _kind: &str,
            _old_props: &Props,
            _new_props: &Props,
        ) -> bool {
            self.log.push(format!("prepare-update #{instance}"));
            true
        }

        fn commit_update(
            &mut self,
            instance: usize,
            _kind: &str,
            _old_props: &Props,
            _new_props: &Props,
        ) {
            self.log.push(format!("commit-update #{instance}"));
        }

        fn commit_text_update(&mut self, text_instance: usize, old: &str, new: &str) {
            self.log
                .push(format!("text-update #{text_instance} {old:?} -> {new:?}"));
        }

        fn prepare_for_commit(&mut self, container: usize) {
            self.log.push(format!("prepare-commit @{container}"));
        }

        fn reset_after_commit(&mut self, container: usize) {
            self.log.push(format!("reset-commit @{container}"));
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
            TimeoutId(delay_ms)
        }

        fn detach_deleted_instance(&mut self, instance: usize) {
            self.log.push(format!("detach #{instance}"));
        }
    }

    fn mounted_doc() -> (Reconciler<TestHost>, RootId) {
        let mut reconciler = Reconciler::new(TestHost::new());
        let root = reconciler.create_container(0);
        let doc = Element::new("doc")
            .child(Element::new("p").child(Element::text("hello")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();
        (reconciler, root)
    }

    #[test]
    fn test_mount_call_sequence() {
        let (reconciler, _) = mounted_doc();
        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "create doc #1 inside=false",
                "create p #2 inside=false",
                "create-text \"hello\" #3",
                "append-initial #2 <- #3",
                "append-initial #1 <- #2",
                "container-append @0 <- #1",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_nothing_pending_flushes_to_nothing() {
        let mut reconciler = Reconciler::new(TestHost::new());
        let root = reconciler.create_container(0);
        reconciler.flush_sync(root).unwrap();
        assert!(reconciler.host().log.is_empty());
    }

    #[test]
    fn test_text_update_in_place() {
        let (mut reconciler, root) = mounted_doc();
        reconciler.host_mut().log.clear();

        let doc = Element::new("doc")
            .child(Element::new("p").child(Element::text("goodbye")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();

        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "text-update #3 \"hello\" -> \"goodbye\"",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_unchanged_tree_commits_no_mutations() {
        let (mut reconciler, root) = mounted_doc();
        reconciler.host_mut().log.clear();

        let doc = Element::new("doc")
            .child(Element::new("p").child(Element::text("hello")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();

        assert_eq!(
            reconciler.host().log,
            ["prepare-commit @0", "reset-commit @0"]
        );
    }

    #[test]
    fn test_changed_props_drive_update_pair() {
        let mut reconciler = Reconciler::new(TestHost::new());
        let root = reconciler.create_container(0);
        let link = Element::new("link").prop("href", "/a");
        reconciler.update_container(root, Some(link)).unwrap();
        reconciler.flush_sync(root).unwrap();
        reconciler.host_mut().log.clear();

        let link = Element::new("link").prop("href", "/b");
        reconciler.update_container(root, Some(link)).unwrap();
        reconciler.flush_sync(root).unwrap();

        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "prepare-update #1",
                "commit-update #1",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_kind_change_replaces_in_slot() {
        let (mut reconciler, root) = mounted_doc();
        reconciler.host_mut().log.clear();

        let doc = Element::new("doc")
            .child(Element::new("h1").child(Element::text("hello")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();

        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "create h1 #4 inside=false",
                "create-text \"hello\" #5",
                "append-initial #4 <- #5",
                "insert #1 <- #4 before #2",
                "remove #1 -> #2",
                "detach #2",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_tail_children_append_and_remove() {
        let (mut reconciler, root) = mounted_doc();
        reconciler.host_mut().log.clear();

        // grow by one paragraph
        let doc = Element::new("doc")
            .child(Element::new("p").child(Element::text("hello")))
            .child(Element::new("p").child(Element::text("more")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();
        assert!(reconciler
            .host()
            .log
            .iter()
            .any(|line| line == "append #1 <- #4"));
        reconciler.host_mut().log.clear();

        // shrink back
        let doc = Element::new("doc")
            .child(Element::new("p").child(Element::text("hello")));
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();
        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "remove #1 -> #4",
                "detach #4",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_unmount_clears_container() {
        let (mut reconciler, root) = mounted_doc();
        reconciler.host_mut().log.clear();

        reconciler.update_container(root, None).unwrap();
        reconciler.flush_sync(root).unwrap();

        assert_eq!(
            reconciler.host().log,
            [
                "prepare-commit @0",
                "clear @0",
                "detach #2",
                "detach #1",
                "reset-commit @0",
            ]
        );
    }

    #[test]
    fn test_context_flips_only_at_boundary() {
        let mut reconciler = Reconciler::new(TestHost::new());
        let root = reconciler.create_container(0);
        let doc = Element::new("doc").child(
            Element::new("list").child(Element::new("item").child(Element::new("leaf"))),
        );
        reconciler.update_container(root, Some(doc)).unwrap();
        reconciler.flush_sync(root).unwrap();

        let creates: Vec<&String> = reconciler
            .host()
            .log
            .iter()
            .filter(|line| line.starts_with("create "))
            .collect();
        assert_eq!(
            creates,
            [
                "create doc #1 inside=false",
                "create list #2 inside=false",
                "create item #3 inside=true",
                "create leaf #4 inside=true",
            ]
        );
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        let mut reconciler = Reconciler::new(TestHost::new());
        let err = reconciler
            .update_container(RootId(7), Some(Element::text("x")))
            .unwrap_err();
        assert_eq!(err, ReconcileError::UnknownRoot(7));
    }

    #[tokio::test]
    async fn test_flush_commits_after_yield() {
        let mut reconciler = Reconciler::new(TestHost::new());
        let root = reconciler.create_container(0);
        reconciler
            .update_container(root, Some(Element::new("doc")))
            .unwrap();
        assert!(reconciler.host().log.is_empty());

        reconciler.flush(root).await.unwrap();
        assert!(reconciler
            .host()
            .log
            .iter()
            .any(|line| line == "reset-commit @0"));
    }
}
