//! Quadrille engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo binary:
//! window/event loop, device + surface management, input state, frame timing,
//! and the transform-render pipeline that draws instances of a shared quad.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
