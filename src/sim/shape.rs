//! Shape providers
//!
//! The simulation never decodes images. A provider hands it the bird's
//! silhouette and a mask for each obstacle segment; whether masks are
//! present decides if collisions go pixel-accurate or stay rectangular.

use std::collections::BTreeMap;
use std::fmt;

use glam::IVec2;

use super::mask::Mask;
use super::state::ObstacleKind;

/// Which half of an obstacle a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SegmentSide {
    Top,
    Bottom,
}

/// Size plus optional occupancy mask
#[derive(Debug, Clone)]
pub struct Silhouette {
    pub size: IVec2,
    pub mask: Option<Mask>,
}

impl Silhouette {
    /// Rectangle-only silhouette
    pub fn boxed(size: IVec2) -> Self {
        Self { size, mask: None }
    }

    /// Silhouette sized to its mask
    pub fn from_mask(mask: Mask) -> Self {
        Self {
            size: mask.size(),
            mask: Some(mask),
        }
    }
}

/// Source of collision shapes
pub trait ShapeProvider: fmt::Debug + Send + Sync {
    /// The bird's silhouette; `default_size` comes from settings
    fn bird(&self, default_size: IVec2) -> Silhouette;

    /// Mask for one obstacle segment of the given size, if the kind has one
    fn segment(&self, kind: ObstacleKind, side: SegmentSide, size: IVec2) -> Option<Mask>;
}

/// Keep `mask` only if it matches `size` exactly
pub(crate) fn checked_mask(mask: Option<Mask>, size: IVec2, what: &str) -> Option<Mask> {
    match mask {
        Some(mask) if mask.size() == size => Some(mask),
        Some(mask) => {
            log::warn!(
                "Discarding {} mask: size {:?} does not match rect {:?}",
                what,
                mask.size(),
                size
            );
            None
        }
        None => None,
    }
}

fn dims(size: IVec2) -> (usize, usize) {
    (size.x.max(0) as usize, size.y.max(0) as usize)
}

/// Fully opaque masks everywhere (pixel tests agree with rect tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidShapes;

impl ShapeProvider for SolidShapes {
    fn bird(&self, default_size: IVec2) -> Silhouette {
        let (w, h) = dims(default_size);
        Silhouette {
            size: default_size,
            mask: Some(Mask::full(w, h)),
        }
    }

    fn segment(&self, _kind: ObstacleKind, _side: SegmentSide, size: IVec2) -> Option<Mask> {
        let (w, h) = dims(size);
        Some(Mask::full(w, h))
    }
}

/// No masks at all: collisions are decided by rectangles alone
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxShapes;

impl ShapeProvider for BoxShapes {
    fn bird(&self, default_size: IVec2) -> Silhouette {
        Silhouette::boxed(default_size)
    }

    fn segment(&self, _kind: ObstacleKind, _side: SegmentSide, _size: IVec2) -> Option<Mask> {
        None
    }
}

/// Template masks per obstacle kind, stretched to each segment
///
/// Templates are drawn upright (bottom segment orientation); top segments
/// use the vertically flipped template. Kinds without a template fall back
/// to rectangle collision.
#[derive(Debug, Clone, Default)]
pub struct MaskTemplates {
    bird: Option<Mask>,
    kinds: BTreeMap<ObstacleKind, Mask>,
}

impl MaskTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bird mask; the bird's rect takes the mask's size
    pub fn with_bird(mut self, mask: Mask) -> Self {
        self.bird = Some(mask);
        self
    }

    /// Set the template for an obstacle kind
    pub fn with_kind(mut self, kind: ObstacleKind, template: Mask) -> Self {
        self.kinds.insert(kind, template);
        self
    }

    pub fn has_kind(&self, kind: ObstacleKind) -> bool {
        self.kinds.contains_key(&kind)
    }
}

impl ShapeProvider for MaskTemplates {
    fn bird(&self, default_size: IVec2) -> Silhouette {
        match &self.bird {
            Some(mask) => Silhouette::from_mask(mask.clone()),
            None => Silhouette::boxed(default_size),
        }
    }

    fn segment(&self, kind: ObstacleKind, side: SegmentSide, size: IVec2) -> Option<Mask> {
        let template = self.kinds.get(&kind)?;
        let (w, h) = dims(size);
        let scaled = template.scaled(w, h);
        Some(match side {
            SegmentSide::Top => scaled.flipped_vertical(),
            SegmentSide::Bottom => scaled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_shapes_match_size() {
        let bird = SolidShapes.bird(IVec2::new(34, 24));
        assert_eq!(bird.size, IVec2::new(34, 24));
        assert_eq!(bird.mask.as_ref().map(|m| m.count()), Some(34 * 24));

        let seg = SolidShapes
            .segment(ObstacleKind::Pipe, SegmentSide::Top, IVec2::new(52, 100))
            .unwrap();
        assert_eq!(seg.size(), IVec2::new(52, 100));
    }

    #[test]
    fn test_box_shapes_have_no_masks() {
        assert!(BoxShapes.bird(IVec2::new(34, 24)).mask.is_none());
        assert!(
            BoxShapes
                .segment(ObstacleKind::Pipe, SegmentSide::Bottom, IVec2::new(52, 100))
                .is_none()
        );
    }

    #[test]
    fn test_templates_flip_top_segment() {
        // Cap on the first row only
        let template = Mask::from_fn(4, 4, |_, y| y == 0);
        let shapes = MaskTemplates::new().with_kind(ObstacleKind::Pipe, template);

        let bottom = shapes
            .segment(ObstacleKind::Pipe, SegmentSide::Bottom, IVec2::new(4, 8))
            .unwrap();
        assert!(bottom.get(0, 0) && bottom.get(0, 1));
        assert!(!bottom.get(0, 7));

        let top = shapes
            .segment(ObstacleKind::Pipe, SegmentSide::Top, IVec2::new(4, 8))
            .unwrap();
        assert!(top.get(0, 7) && top.get(0, 6));
        assert!(!top.get(0, 0));

        assert!(
            shapes
                .segment(ObstacleKind::LampPost, SegmentSide::Bottom, IVec2::new(4, 8))
                .is_none()
        );
    }

    #[test]
    fn test_templates_bird_uses_mask_size() {
        let shapes = MaskTemplates::new().with_bird(Mask::full(30, 20));
        assert_eq!(shapes.bird(IVec2::new(34, 24)).size, IVec2::new(30, 20));
        assert_eq!(
            MaskTemplates::new().bird(IVec2::new(34, 24)).size,
            IVec2::new(34, 24)
        );
    }

    #[test]
    fn test_checked_mask_discards_mismatch() {
        let size = IVec2::new(4, 4);
        assert!(checked_mask(Some(Mask::full(4, 4)), size, "test").is_some());
        assert!(checked_mask(Some(Mask::full(3, 4)), size, "test").is_none());
        assert!(checked_mask(None, size, "test").is_none());
    }
}
