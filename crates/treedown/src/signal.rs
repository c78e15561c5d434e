//! The per-render commit signal.
//!
//! Each render call creates one channel: the publisher half moves into the
//! host adapter and fires from `reset_after_commit`; the signal half stays
//! with the caller, who awaits the committed root before serializing.
//! Because nothing here outlives a single render, sequential or overlapping
//! renders cannot see each other's commits.

use tokio::sync::oneshot;

use crate::tree::NodeId;

/// Sending half: publishes the committed root, at most once.
pub struct CommitPublisher {
    sender: oneshot::Sender<NodeId>,
}

impl CommitPublisher {
    /// Publish the committed root. Consumes the publisher; a receiver that
    /// is already gone is ignored.
    pub fn publish(self, root: NodeId) {
        let _ = self.sender.send(root);
    }
}

/// Receiving half: resolves once the commit has been published.
pub struct CommitSignal {
    receiver: oneshot::Receiver<NodeId>,
}

impl CommitSignal {
    /// Wait for the commit. Returns `None` if the publisher was dropped
    /// without firing.
    pub async fn wait(self) -> Option<NodeId> {
        self.receiver.await.ok()
    }
}

/// Create a fresh publisher/signal pair for one render call.
pub fn commit_channel() -> (CommitPublisher, CommitSignal) {
    let (sender, receiver) = oneshot::channel();
    (CommitPublisher { sender }, CommitSignal { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MarkdownTree;

    #[tokio::test]
    async fn test_publish_resolves_wait() {
        let tree = MarkdownTree::new();
        let (publisher, signal) = commit_channel();
        publisher.publish(tree.root());
        assert_eq!(signal.wait().await, Some(tree.root()));
    }

    #[tokio::test]
    async fn test_dropped_publisher_yields_none() {
        let (publisher, signal) = commit_channel();
        drop(publisher);
        assert_eq!(signal.wait().await, None);
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let tree = MarkdownTree::new();
        let (first_publisher, first_signal) = commit_channel();
        let (second_publisher, second_signal) = commit_channel();
        drop(second_publisher);
        first_publisher.publish(tree.root());

        assert_eq!(first_signal.wait().await, Some(tree.root()));
        assert_eq!(second_signal.wait().await, None);
    }
}
