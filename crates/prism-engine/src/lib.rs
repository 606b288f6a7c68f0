//! Prism engine crate.
//!
//! Platform and GPU runtime used by the scene layer: backend tier
//! negotiation, the winit event loop, input translation and frame timing.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
