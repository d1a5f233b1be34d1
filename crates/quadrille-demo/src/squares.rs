//! The five square instances.
//!
//! One shared quad, five transforms: identity, translated, scaled, rotated,
//! and a combined scale + shear. Order is draw order; each instance has a
//! fixed color.

use glam::{Mat4, Vec3};

use quadrille_engine::paint::Color;
use quadrille_engine::scene::{DrawDescriptor, DrawList};

/// Rotation of the fourth square about Z, in radians (45 degrees).
pub const ROTATION_ANGLE: f32 = 0.785398;

/// Shear factors applied on top of the fifth square's 0.5 uniform scale:
/// x picks up 0.5 per unit of y, y picks up 0.2 per unit of x.
pub const SHEAR_X_FROM_Y: f32 = 0.5;
pub const SHEAR_Y_FROM_X: f32 = 0.2;

const RED: Color = Color::opaque(1.0, 0.0, 0.0);
const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
const PURPLE: Color = Color::opaque(1.0, 0.0, 1.0);
const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);

fn sheared() -> Mat4 {
    let mut m = Mat4::from_scale(Vec3::new(0.5, 0.5, 1.0));
    m.y_axis.x = SHEAR_X_FROM_Y;
    m.x_axis.y = SHEAR_Y_FROM_X;
    m
}

/// Builds the fixed draw list:
/// {identity, translated, scaled, rotated, sheared} in
/// {red, green, blue, purple, yellow}.
pub fn descriptors() -> DrawList {
    [
        DrawDescriptor::identity(RED),
        DrawDescriptor::new(Mat4::from_translation(Vec3::new(1.5, 0.0, 0.0)), GREEN),
        DrawDescriptor::new(Mat4::from_scale(Vec3::new(1.5, 1.5, 1.0)), BLUE),
        DrawDescriptor::new(Mat4::from_rotation_z(ROTATION_ANGLE), PURPLE),
        DrawDescriptor::new(sheared(), YELLOW),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrille_engine::render::projection;

    const EPS: f32 = 1e-5;

    fn nth(i: usize) -> DrawDescriptor {
        *descriptors().iter().nth(i).expect("descriptor index in range")
    }

    /// Corners of the shared quad (half-extent 0.25).
    fn corners() -> [Vec3; 4] {
        [
            Vec3::new(0.25, 0.25, 0.0),
            Vec3::new(0.25, -0.25, 0.0),
            Vec3::new(-0.25, -0.25, 0.0),
            Vec3::new(-0.25, 0.25, 0.0),
        ]
    }

    #[test]
    fn five_descriptors_in_fixed_color_order() {
        let list = descriptors();
        assert_eq!(list.len(), 5);

        let colors: Vec<[f32; 4]> = list.iter().map(|d| d.color.to_array()).collect();
        assert_eq!(
            colors,
            vec![
                [1.0, 0.0, 0.0, 1.0], // red
                [0.0, 1.0, 0.0, 1.0], // green
                [0.0, 0.0, 1.0, 1.0], // blue
                [1.0, 0.0, 1.0, 1.0], // purple
                [1.0, 1.0, 0.0, 1.0], // yellow
            ]
        );
    }

    #[test]
    fn identity_leaves_corners_in_place() {
        let t = nth(0).transform;
        for c in corners() {
            assert!((t.transform_point3(c) - c).length() < EPS);
        }
    }

    #[test]
    fn translation_moves_center_to_1_5() {
        let t = nth(1).transform;
        let center = t.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(1.5, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn scale_keeps_center_and_grows_extent() {
        let t = nth(2).transform;
        assert!((t.transform_point3(Vec3::ZERO)).length() < EPS);

        let corner = t.transform_point3(Vec3::new(0.25, 0.25, 0.0));
        assert!((corner - Vec3::new(0.375, 0.375, 0.0)).length() < EPS);
    }

    #[test]
    fn rotation_preserves_distance_from_origin() {
        let t = nth(3).transform;
        for c in corners() {
            let r = t.transform_point3(c);
            assert!((r.length() - c.length()).abs() < EPS);
        }
        // 45 degrees sends the top-right corner onto the +Y axis.
        let top_right = t.transform_point3(Vec3::new(0.25, 0.25, 0.0));
        assert!(top_right.x.abs() < EPS);
        assert!((top_right.y - 0.25 * std::f32::consts::SQRT_2).abs() < EPS);
    }

    #[test]
    fn shear_entries_sit_in_documented_cells() {
        let t = nth(4).transform;
        assert_eq!(t.x_axis.x, 0.5);
        assert_eq!(t.y_axis.y, 0.5);
        assert_eq!(t.y_axis.x, SHEAR_X_FROM_Y);
        assert_eq!(t.x_axis.y, SHEAR_Y_FROM_X);
    }

    #[test]
    fn shear_maps_corner_as_documented() {
        // x' = 0.5x + 0.5y, y' = 0.2x + 0.5y
        let t = nth(4).transform;
        let p = t.transform_point3(Vec3::new(0.25, 0.25, 0.0));
        assert!((p.x - 0.25).abs() < EPS);
        assert!((p.y - 0.175).abs() < EPS);
    }

    #[test]
    fn translated_square_does_not_overlap_the_others() {
        // The translated quad spans x in [1.25, 1.75]; the widest of the
        // origin-centered quads (the 1.5x scale) reaches only x = 0.375.
        let translated = nth(1).transform;
        let min_x = corners()
            .iter()
            .map(|&c| translated.transform_point3(c).x)
            .fold(f32::INFINITY, f32::min);
        assert!(min_x > 0.375);
    }

    #[test]
    fn projected_translated_center_lands_at_expected_ndc() {
        let clip = projection::world_to_clip() * nth(1).transform;
        let center = clip.transform_point3(Vec3::ZERO);
        assert!((center.x - 0.75).abs() < EPS);
        assert!(center.y.abs() < EPS);
    }
}
