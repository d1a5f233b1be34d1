//! GPU rendering subsystem.
//!
//! The single renderer here draws instances of a shared quad mesh under
//! per-instance transforms, as described by a `scene::DrawList`.
//!
//! Convention:
//! - CPU geometry is in world units (origin-centered, +Y up).
//! - The vertex shader maps world to clip space with a projection uniform.

mod ctx;
mod quad;

pub mod projection;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::{QuadRenderer, ShaderPolicy};
