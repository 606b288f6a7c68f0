//! GPU rendering glue.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! `RenderTarget` handed out once per frame.

mod ctx;

pub use ctx::RenderTarget;
