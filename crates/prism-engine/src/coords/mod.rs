//! Viewport and color types shared by the runtime and scene renderers.
//!
//! Window space is logical pixels, origin top-left, +Y down. Normalized
//! pointer space is `[-1, 1]` on both axes with +Y up.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
