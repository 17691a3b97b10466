//! Camera module
//!
//! Perspective camera, the one-time framer, and damped orbit controls.

mod camera;
mod framer;
mod orbit_controls;

pub use camera::Camera;
pub use framer::CameraFramer;
pub use orbit_controls::{Orbit, OrbitControls};
