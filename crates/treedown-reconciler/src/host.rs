//! The host-configuration contract.
//!
//! A host adapter implements [`HostConfig`] to receive the engine's tree
//! mutations. The surface is intentionally large: the engine demands the
//! full capability set even though most hosts only care about a handful of
//! operations. Everything a typical host leaves inert has a default
//! implementation here, so adapters override only the behavioral subset.

use crate::element::Props;

/// A reference to either an element instance or a text instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle<I, T> {
    Element(I),
    Text(T),
}

/// Update priority classes used by the engine's scheduler bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPriority {
    /// Sentinel: no priority has been set explicitly.
    #[default]
    NoPriority,
    Discrete,
    Continuous,
    Default,
    Idle,
}

/// Opaque handle for a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutId(pub i64);

impl TimeoutId {
    /// The "no timeout scheduled" sentinel.
    pub const NONE: TimeoutId = TimeoutId(-1);
}

/// The operation surface an engine host must provide.
///
/// Handles are plain `Copy` values (typically arena indices); the host owns
/// the actual nodes and all mutation goes through `&mut self`.
pub trait HostConfig {
    type Container: Copy + std::fmt::Debug;
    type Instance: Copy + std::fmt::Debug;
    type TextInstance: Copy + std::fmt::Debug;
    type HostContext: Clone + PartialEq;

    const SUPPORTS_MUTATION: bool = true;
    const SUPPORTS_PERSISTENCE: bool = false;
    const SUPPORTS_HYDRATION: bool = false;
    const IS_PRIMARY_RENDERER: bool = false;

    // ---- context propagation ----

    /// Context for the root container's immediate children.
    fn root_host_context(&self, container: Self::Container) -> Self::HostContext;

    /// Context for children of an element of `kind`.
    ///
    /// Returns `None` when the context is unchanged; the engine then keeps
    /// using the parent context instead of cloning a fresh one. Hosts must
    /// preserve this so context churn stays proportional to actual changes.
    fn child_host_context(
        &self,
        parent: &Self::HostContext,
        kind: &str,
    ) -> Option<Self::HostContext>;

    // ---- instance lifecycle ----

    fn create_instance(
        &mut self,
        kind: &str,
        props: &Props,
        context: &Self::HostContext,
    ) -> Self::Instance;

    fn create_text_instance(&mut self, text: &str, context: &Self::HostContext)
        -> Self::TextInstance;

    /// When `true`, the host inlines text children itself and the engine
    /// skips materializing text instances under this element.
    fn should_set_text_content(&self, kind: &str, props: &Props) -> bool;

    fn append_initial_child(
        &mut self,
        parent: Self::Instance,
        child: Handle<Self::Instance, Self::TextInstance>,
    );

    /// Returns `true` if the instance needs a post-commit mount callback.
    fn finalize_initial_children(
        &mut self,
        _instance: Self::Instance,
        _kind: &str,
        _props: &Props,
    ) -> bool {
        false
    }

    fn get_public_instance(
        &self,
        handle: Handle<Self::Instance, Self::TextInstance>,
    ) -> Handle<Self::Instance, Self::TextInstance> {
        handle
    }

    // ---- mutation, interior granularity ----

    fn append_child(
        &mut self,
        parent: Self::Instance,
        child: Handle<Self::Instance, Self::TextInstance>,
    );

    fn insert_before(
        &mut self,
        parent: Self::Instance,
        child: Handle<Self::Instance, Self::TextInstance>,
        before: Handle<Self::Instance, Self::TextInstance>,
    );

    fn remove_child(
        &mut self,
        parent: Self::Instance,
        child: Handle<Self::Instance, Self::TextInstance>,
    );

    // ---- mutation, container granularity ----

    fn append_child_to_container(
        &mut self,
        container: Self::Container,
        child: Handle<Self::Instance, Self::TextInstance>,
    );

    fn insert_in_container_before(
        &mut self,
        container: Self::Container,
        child: Handle<Self::Instance, Self::TextInstance>,
        before: Handle<Self::Instance, Self::TextInstance>,
    );

    fn remove_child_from_container(
        &mut self,
        container: Self::Container,
        child: Handle<Self::Instance, Self::TextInstance>,
    );

    fn clear_container(&mut self, container: Self::Container);

    // ---- updates ----

    /// Diff props ahead of commit. Returns `true` when [`commit_update`]
    /// should be invoked for this instance.
    ///
    /// [`commit_update`]: HostConfig::commit_update
    fn prepare_update(
        &mut self,
        _instance: Self::Instance,
        _kind: &str,
        _old_props: &Props,
        _new_props: &Props,
    ) -> bool {
        false
    }

    fn commit_update(
        &mut self,
        _instance: Self::Instance,
        _kind: &str,
        _old_props: &Props,
        _new_props: &Props,
    ) {
    }

    fn commit_text_update(
        &mut self,
        text_instance: Self::TextInstance,
        old_text: &str,
        new_text: &str,
    );

    fn reset_text_content(&mut self, _instance: Self::Instance) {}

    // ---- commit notification ----

    fn prepare_for_commit(&mut self, _container: Self::Container) {}

    /// The single publication point: the container's tree is settled.
    /// Hosts publish here; they do not compute here.
    fn reset_after_commit(&mut self, container: Self::Container);

    // ---- update priority ----

    fn set_current_update_priority(&mut self, priority: EventPriority);

    fn get_current_update_priority(&self) -> EventPriority;

    /// The explicitly set priority, or the default sentinel when none is set.
    fn resolve_update_priority(&self) -> EventPriority;

    fn get_current_event_priority(&self) -> EventPriority {
        EventPriority::Default
    }

    // ---- timeout scheduling ----

    /// Schedule a timeout. The delay is handed through uninterpreted, so a
    /// negative value reaches the host's scheduling primitive unchanged.
    fn schedule_timeout(&mut self, delay_ms: i64) -> TimeoutId;

    fn cancel_timeout(&mut self, _handle: TimeoutId) {}

    // ---- visibility ----

    fn hide_instance(&mut self, _instance: Self::Instance) {}

    fn unhide_instance(&mut self, _instance: Self::Instance, _props: &Props) {}

    fn hide_text_instance(&mut self, _text_instance: Self::TextInstance) {}

    fn unhide_text_instance(&mut self, _text_instance: Self::TextInstance, _text: &str) {}

    // ---- suspense ----

    fn may_suspend_commit(&self, _kind: &str, _props: &Props) -> bool {
        false
    }

    fn preload_instance(&mut self, _kind: &str, _props: &Props) -> bool {
        true
    }

    fn start_suspending_commit(&mut self) {}

    fn suspend_instance(&mut self, _kind: &str, _props: &Props) {}

    fn wait_for_commit_to_be_ready(&mut self) {}

    // ---- scopes ----

    fn prepare_scope_update(&mut self, _instance: Self::Instance) {}

    fn get_instance_from_scope(&self, _scope: &str) -> Option<Self::Instance> {
        None
    }

    // ---- teardown ----

    fn detach_deleted_instance(&mut self, _instance: Self::Instance) {}
}
