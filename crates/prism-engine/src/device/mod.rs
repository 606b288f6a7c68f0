//! GPU device + surface management.
//!
//! This module is responsible for:
//! - negotiating a rendering backend tier (preferred → secondary → baseline)
//! - creating & configuring the Surface (swapchain) on the chosen adapter
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod error;
mod frame;
mod init;
mod negotiate;
mod surface;

pub use context::Gpu;
pub use error::{BackendFatal, BackendUnavailable, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use negotiate::{negotiate, BackendTier, Negotiated, NegotiationState, TierProbe};
