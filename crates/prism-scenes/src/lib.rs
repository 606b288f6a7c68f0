//! Procedural SDF scenes for **prism**.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`variant`] | `SceneVariant` tags and parsing |
//! | [`scenes`] | per-variant scene state, parameters and composition trees |
//! | [`program`] | `compose()` + WGSL assembly, pipeline flavors |
//! | [`uniforms`] | the std140 uniform block shared with every shader |
//! | [`mesh`] / [`camera`] | tessellated planes and view projections |
//! | [`device`] | `SceneDevice` seam + the wgpu implementation |
//! | [`lifecycle`] | `SceneManager`: exclusive switching and teardown |
//! | [`driver`] | `FrameDriver`: per-frame updates, input, resize |
//!
//! Exactly one scene owns GPU resources at a time. Switching always tears the
//! old scene down before the new one is built.

pub mod camera;
pub mod device;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod mesh;
pub mod program;
pub mod scenes;
pub mod uniforms;
pub mod variant;

pub use device::{GpuSceneDevice, GpuSceneResources, SceneDevice};
pub use driver::FrameDriver;
pub use error::SceneError;
pub use lifecycle::{SceneManager, SwitchOutcome};
pub use program::{compose, ComposedScene, PipelineFlavor, SceneProgram};
pub use scenes::{Scene, Subscriptions};
pub use uniforms::UniformBlock;
pub use variant::SceneVariant;
