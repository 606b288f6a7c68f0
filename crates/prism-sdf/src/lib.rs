//! Signed distance field library for **prism** scenes.
//!
//! Everything in this crate is pure CPU code. The same composition tree is
//! evaluated here (tests, ray marching markers) and emitted as WGSL for the
//! per-pixel GPU stage, so both sides agree on every formula.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`primitives`] | `sdf_circle`, `sdf_box`, `sdf_ellipse`, `sdf_moon`, ... |
//! | [`ops`] | union / intersection / subtraction / smooth blend |
//! | [`value`] | `Value<P>` parameter expressions bound to uniforms |
//! | [`node`] | `Node<P>` composition tree |
//! | [`wgsl`] | WGSL library source + tree emission |
//! | [`march`] | bounded 2D sphere tracing |
//!
//! Sign convention: negative inside, zero on the boundary, positive outside.

pub mod march;
pub mod node;
pub mod ops;
pub mod primitives;
pub mod value;
pub mod wgsl;

pub use glam::Vec2;
pub use march::{march, March, MarchOutcome, MarchSample, MarchSettings, MAX_MARCH_STEPS};
pub use node::Node;
pub use value::{Value, V2};
