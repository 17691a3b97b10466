/*!
# Folio3D Overlay

Compositor that projects a live 2D content element (a web page, a UI
panel) onto the display surface of a loaded 3D model, such as the screen
of a laptop, and keeps it consistent while the camera orbits and the
window resizes.

## Pipeline

- **Model Normalizer**: scales and re-centres the loaded model
- **Surface Locator**: finds the display mesh by name, whole model as fallback
- **Screen-Space Mapper**: content plane and occluder placement
- **Camera Framer**: one-time framing in front of the surface
- **Visibility Gate**: per-frame front/back test
- **Render Loop**: drives the compositor and a [`Renderer`](folio3d::render::Renderer)

Loading, host events and rendering are seams (`ModelLoader`, `HostEvents`,
`Renderer`) so the compositor runs headless in tests.
*/

// Internal modules
mod compositor;
mod config;
mod error;
mod placeholder;
mod render_loop;
pub mod camera;
pub mod events;
pub mod loader;
pub mod log;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod surface;

// Main folio3d namespace module
pub mod folio3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Lifecycle
    pub use crate::compositor::{Compositor, CompositorState};
    pub use crate::config::{CompositorConfig, IdleAnimation, PlaceholderRule};
    pub use crate::render_loop::{FrameReport, RenderLoop};

    // Logging sub-module (types and logger slot, NOT macros)
    pub mod log {
        pub use crate::log::{reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod surface {
        pub use crate::surface::*;
    }

    pub mod overlay {
        pub use crate::overlay::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod events {
        pub use crate::events::*;
    }

    pub mod loader {
        pub use crate::loader::*;
    }

    pub mod placeholder {
        pub use crate::placeholder::{build_placeholder, IdleAnimator, PlaceholderKind};
    }
}

// Re-export math library at crate root
pub use glam;
