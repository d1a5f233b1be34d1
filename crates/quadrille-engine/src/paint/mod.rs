//! Paint model shared between the scene and the renderer.
//!
//! Scope is deliberately small: opaque wireframe drawing needs solid colors
//! only, so there is no gradient or pattern machinery here.

mod color;

pub use color::Color;
