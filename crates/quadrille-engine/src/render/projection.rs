//! Orthographic world-to-clip projection.
//!
//! The scene is 2D, so a parallel projection from a fixed box suffices. The
//! box never changes, so the matrix is computed once at setup and re-uploaded
//! (not recomputed) every frame.
//!
//! Note on depth convention: `Mat4::orthographic_rh` targets wgpu's 0..1 clip
//! depth, not GL's -1..1, so the Z column differs from the classic GL ortho
//! formula. All geometry lives at z = 0, which lands at clip depth 0.5 and is
//! always visible.

use glam::Mat4;

pub const LEFT: f32 = -2.0;
pub const RIGHT: f32 = 2.0;
pub const BOTTOM: f32 = -2.0;
pub const TOP: f32 = 2.0;
pub const NEAR: f32 = -1.0;
pub const FAR: f32 = 1.0;

/// Returns the orthographic projection for the fixed world box.
#[inline]
pub fn world_to_clip() -> Mat4 {
    Mat4::orthographic_rh(LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn symmetric_box_has_expected_diagonal() {
        let m = world_to_clip();
        // X/Y scales are 2/(right-left) = 1/2. The Z entries follow wgpu's
        // 0..1 depth convention (1/(near-far) = -1/2) rather than GL's -1.
        assert_eq!(m.x_axis.x, 0.5);
        assert_eq!(m.y_axis.y, 0.5);
        assert_eq!(m.z_axis.z, -0.5);
        assert_eq!(m.w_axis.w, 1.0);
    }

    #[test]
    fn symmetric_box_has_no_xy_translation() {
        let m = world_to_clip();
        assert_eq!(m.w_axis.x, 0.0);
        assert_eq!(m.w_axis.y, 0.0);
        // Depth remap places z = 0 mid-range.
        assert_eq!(m.w_axis.z, 0.5);
    }

    #[test]
    fn box_corners_map_to_ndc_corners() {
        let m = world_to_clip();
        let tr = m.transform_point3(Vec3::new(2.0, 2.0, 0.0));
        let bl = m.transform_point3(Vec3::new(-2.0, -2.0, 0.0));
        assert_eq!((tr.x, tr.y), (1.0, 1.0));
        assert_eq!((bl.x, bl.y), (-1.0, -1.0));
    }

    #[test]
    fn origin_stays_centered() {
        let m = world_to_clip();
        let o = m.transform_point3(Vec3::ZERO);
        assert_eq!((o.x, o.y), (0.0, 0.0));
        assert_eq!(o.z, 0.5);
    }
}
