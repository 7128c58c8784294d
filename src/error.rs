//! Typed errors surfaced by chart composition and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single chart composition.
///
/// Missing countries are *not* errors; they are reported through
/// [`crate::models::RenderResult::Rendered::missing_countries`].
#[derive(Debug, Error)]
pub enum ChartError {
    /// Input tables do not line up with the date axis.
    #[error("invalid dataset: {0}")]
    Dataset(String),

    /// The drawing backend failed while laying out or drawing the chart.
    #[error("rendering failed: {0}")]
    Render(String),

    /// No font could be registered for the text path.
    #[error("no usable font: {0}")]
    Font(String),

    /// Writing the rendered chart to disk failed.
    #[error("failed to persist chart to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    /// Wrap any plotters drawing error; they only implement `Debug` reliably.
    pub(crate) fn render<E: std::fmt::Debug>(e: E) -> Self {
        ChartError::Render(format!("{e:?}"))
    }
}
