//! Surface module
//!
//! Runs once per loaded model: normalize the model, find the display
//! surface mesh, and measure it.

mod descriptor;
mod locator;
mod normalizer;

pub use descriptor::SurfaceDescriptor;
pub use locator::{find_surface_node, LocatedSurface, SurfaceKind, SurfaceLocator};
pub use normalizer::{ModelNormalizer, NormalizeReport};
