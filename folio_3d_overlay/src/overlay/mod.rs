//! Overlay module
//!
//! Projects the host's 2D content element onto the located surface and
//! decides each frame whether it is shown.

mod content;
mod mapper;
mod visibility;

pub use content::{ContentElement, ContentSize};
pub use mapper::{MappingOutcome, OccluderPlacement, OverlayPlacement, ScreenSpaceMapper};
pub use visibility::{VisibilityDecision, VisibilityGate};
