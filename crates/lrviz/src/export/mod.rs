//! Export of revealed diagrams.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`LrvizError::Export`](crate::LrvizError::Export) at the crate boundary.

pub mod svg;

mod text;

use thiserror::Error;

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A style or rendering failure described by the message.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
