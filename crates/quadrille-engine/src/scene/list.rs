use glam::Mat4;

use crate::paint::Color;

use super::DrawDescriptor;

/// Ordered list of draw descriptors.
///
/// Draw order is insertion order. With a shared mesh and shader this is what
/// determines overdraw where instances overlap in screen space, so the list
/// never reorders entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    items: Vec<DrawDescriptor>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a draw descriptor at the end of the list.
    #[inline]
    pub fn push(&mut self, descriptor: DrawDescriptor) {
        self.items.push(descriptor);
    }

    /// Records a transform + color pair at the end of the list.
    #[inline]
    pub fn push_square(&mut self, transform: Mat4, color: Color) {
        self.push(DrawDescriptor::new(transform, color));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates descriptors in draw order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawDescriptor> {
        self.items.iter()
    }
}

impl FromIterator<DrawDescriptor> for DrawList {
    fn from_iter<I: IntoIterator<Item = DrawDescriptor>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut list = DrawList::new();
        list.push_square(Mat4::IDENTITY, Color::opaque(1.0, 0.0, 0.0));
        list.push_square(Mat4::from_translation(glam::Vec3::X), Color::opaque(0.0, 1.0, 0.0));
        list.push_square(Mat4::from_scale(glam::Vec3::splat(2.0)), Color::opaque(0.0, 0.0, 1.0));

        let colors: Vec<[f32; 4]> = list.iter().map(|d| d.color.to_array()).collect();
        assert_eq!(
            colors,
            vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ]
        );
    }

    #[test]
    fn from_iterator_keeps_order() {
        let descriptors = [
            DrawDescriptor::identity(Color::WHITE),
            DrawDescriptor::new(Mat4::from_rotation_z(1.0), Color::BLACK),
        ];
        let list: DrawList = descriptors.into_iter().collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().next().unwrap().color, Color::WHITE);
    }
}
