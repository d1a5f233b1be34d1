use glam::Mat4;

use crate::paint::Color;

/// Per-instance render parameters for the shared quad mesh.
///
/// A descriptor is a value pair: the model-space affine transform applied to
/// the base vertices, and the solid color the instance is drawn with. Both
/// are uploaded as uniforms immediately before the instance's draw call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawDescriptor {
    pub transform: Mat4,
    pub color: Color,
}

impl DrawDescriptor {
    #[inline]
    pub const fn new(transform: Mat4, color: Color) -> Self {
        Self { transform, color }
    }

    /// An untransformed instance.
    #[inline]
    pub const fn identity(color: Color) -> Self {
        Self::new(Mat4::IDENTITY, color)
    }
}
