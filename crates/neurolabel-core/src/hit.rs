use crate::detection::DetectionId;
use crate::geometry::Point;
use crate::scene::Scene;
use crate::selection::HandleRole;

/// What an input event landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Background,
    Shape(DetectionId),
    Handle(HandleRole),
}

/// Classify `p` against `scene`: grips first, then shapes from top-most to
/// bottom-most, otherwise the background.
pub fn hit_test(scene: &Scene, p: Point) -> HitTarget {
    if let Some(role) = scene.handles.hit(p) {
        return HitTarget::Handle(role);
    }
    scene
        .shapes
        .iter()
        .rev()
        .find(|s| s.rect.contains(p))
        .map_or(HitTarget::Background, |s| HitTarget::Shape(s.id))
}
