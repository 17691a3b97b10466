//! Error types for the Folio3D overlay compositor
//!
//! Most failures in the compositor are recoverable and degrade to an
//! inferior but running scene (placeholder model, whole-model surface,
//! unit scale). Those conditions are logged and reflected in state.
//! `Error` is returned for configuration mistakes, out-of-order phase
//! calls, and stale node keys handed to explicit scene graph operations.

use std::fmt;

/// Result type for Folio3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Folio3D compositor errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The model loader reported a failure
    LoadFailure(String),

    /// No mesh in the model matched the surface name candidates
    SurfaceNotFound(String),

    /// The content element reported a zero pixel dimension
    DegenerateContentSize { width: u32, height: u32 },

    /// No content element is attached (or the host dropped it)
    MissingContentElement,

    /// A configuration field is out of range
    InvalidConfig(String),

    /// An operation was called in the wrong lifecycle phase
    InvalidState(String),

    /// A node key does not (or no longer) refer to a live node
    InvalidNode(String),

    /// The host cannot provide a rendering surface at all
    RenderingUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LoadFailure(msg) => write!(f, "Model load failed: {}", msg),
            Error::SurfaceNotFound(msg) => write!(f, "Surface not found: {}", msg),
            Error::DegenerateContentSize { width, height } => {
                write!(f, "Degenerate content size: {}x{}", width, height)
            }
            Error::MissingContentElement => write!(f, "Missing content element"),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::RenderingUnavailable(msg) => write!(f, "Rendering unavailable: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`], logging it at ERROR level with file:line.
///
/// ```ignore
/// return Err(overlay_err!("folio3d::Scene", InvalidNode, "stale key {:?}", key));
/// ```
#[macro_export]
macro_rules! overlay_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::overlay_error!($source, "{}", message);
        $crate::folio3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! overlay_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::overlay_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
