//! The render entry point: element description in, Markdown text out.

use treedown_reconciler::{Element, ReconcileError, Reconciler};

use crate::host::MarkdownHost;
use crate::options::RenderOptions;
use crate::renderer::MarkdownRenderer;
use crate::signal::commit_channel;

/// Error type for render operations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),
    #[error("the commit was never published")]
    MissingCommit,
}

/// Render an element description to Markdown with default options.
pub async fn render_to_markdown(element: Element) -> Result<String, RenderError> {
    render_to_markdown_with(element, RenderOptions::default()).await
}

/// Render an element description to Markdown.
///
/// Each call owns a fresh shadow tree, commit signal and reconciler;
/// nothing is shared with earlier or concurrent renders. The returned
/// string follows the per-kind grammar exactly, with no trailing-newline
/// normalization.
pub async fn render_to_markdown_with(
    element: Element,
    options: RenderOptions,
) -> Result<String, RenderError> {
    let (publisher, signal) = commit_channel();
    let host = MarkdownHost::new(publisher);
    let container = host.root();

    let mut reconciler = Reconciler::new(host);
    let root = reconciler.create_container(container);
    reconciler.update_container(root, Some(element))?;
    reconciler.flush(root).await?;

    let committed = signal.wait().await.ok_or(RenderError::MissingCommit)?;
    let host = reconciler.into_host();
    let renderer = MarkdownRenderer::with_options(options);
    let markdown = renderer.render(host.tree(), committed);
    tracing::debug!(bytes = markdown.len(), "render finished");
    Ok(markdown)
}
