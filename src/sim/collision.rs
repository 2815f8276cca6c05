//! Collision detection between the bird and obstacle segments
//!
//! Two phases per segment: a rectangle overlap test, then (only on a
//! rectangle hit, and only when both sides carry masks) a per-pixel test.
//! Without masks the rectangle verdict stands.

use glam::IVec2;

use super::geom::Rect;
use super::mask::Mask;
use super::shape::SegmentSide;
use super::state::{Bird, Obstacle, Segment};

/// Where the bird touched an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub side: SegmentSide,
    /// First shared pixel (play-area coordinates); for rectangle-only hits,
    /// the top-left of the overlap region
    pub point: IVec2,
    /// True if decided by masks rather than rectangles alone
    pub pixel_accurate: bool,
}

/// Test two placed shapes; returns the first shared pixel and whether masks decided it
pub fn shape_overlap(
    a_rect: &Rect,
    a_mask: Option<&Mask>,
    b_rect: &Rect,
    b_mask: Option<&Mask>,
) -> Option<(IVec2, bool)> {
    // Broad phase
    let region = a_rect.intersection(b_rect)?;

    // Narrow phase
    match (a_mask, b_mask) {
        (Some(a_mask), Some(b_mask)) => {
            let offset = b_rect.origin - a_rect.origin;
            a_mask
                .overlap(b_mask, offset)
                .map(|p| (a_rect.origin + p, true))
        }
        _ => Some((region.origin, false)),
    }
}

/// Check the bird against a single segment
pub fn segment_contact(bird: &Bird, segment: &Segment) -> Option<Contact> {
    shape_overlap(
        &segment.rect,
        segment.mask.as_ref(),
        &bird.rect,
        bird.mask.as_ref(),
    )
    .map(|(point, pixel_accurate)| Contact {
        side: segment.side,
        point,
        pixel_accurate,
    })
}

/// First segment (top, then bottom) the bird touches
pub fn first_contact(bird: &Bird, obstacle: &Obstacle) -> Option<Contact> {
    obstacle
        .segments()
        .find_map(|segment| segment_contact(bird, segment))
}

/// Check if the bird touches any segment of the obstacle
pub fn collides(bird: &Bird, obstacle: &Obstacle) -> bool {
    first_contact(bird, obstacle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::shape::{BoxShapes, SolidShapes};
    use crate::sim::state::ObstacleKind;

    fn bird_at(x: i32, y: i32, mask: Option<Mask>) -> Bird {
        Bird {
            y: y as f32,
            vel: 0.0,
            rect: Rect::new(x, y, 10, 10),
            mask,
        }
    }

    fn segment(rect: Rect, mask: Option<Mask>) -> Segment {
        Segment {
            side: SegmentSide::Bottom,
            rect,
            mask,
        }
    }

    #[test]
    fn test_full_masks_same_rect_collide() {
        let bird = bird_at(0, 0, Some(Mask::full(10, 10)));
        let seg = segment(Rect::new(0, 0, 10, 10), Some(Mask::full(10, 10)));
        let contact = segment_contact(&bird, &seg).unwrap();
        assert_eq!(contact.point, IVec2::ZERO);
        assert!(contact.pixel_accurate);
    }

    #[test]
    fn test_separate_rects_never_collide() {
        let bird = bird_at(0, 0, Some(Mask::full(10, 10)));
        // Masks would overlap at this offset if the broad phase were skipped
        let seg = segment(Rect::new(20, 0, 10, 10), Some(Mask::full(10, 10)));
        assert!(segment_contact(&bird, &seg).is_none());
    }

    #[test]
    fn test_rect_hit_but_transparent_pixels_miss() {
        // Bird solid only in its top-left pixel
        let bird_mask = Mask::from_fn(10, 10, |x, y| x == 0 && y == 0);
        let bird = bird_at(5, 5, Some(bird_mask));
        // Segment solid only in its top-left quadrant
        let seg_mask = Mask::from_fn(10, 10, |x, y| x < 5 && y < 5);
        let seg = segment(Rect::new(0, 0, 10, 10), Some(seg_mask));
        assert!(segment_contact(&bird, &seg).is_none());

        // Move the bird one pixel up-left: its solid pixel lands on (4, 4)
        let bird = bird_at(4, 4, bird.mask.clone());
        let contact = segment_contact(&bird, &seg).unwrap();
        assert_eq!(contact.point, IVec2::new(4, 4));
    }

    #[test]
    fn test_missing_mask_falls_back_to_rects() {
        let bird = bird_at(5, 5, None);
        let seg = segment(Rect::new(0, 0, 10, 10), Some(Mask::new(10, 10)));
        let contact = segment_contact(&bird, &seg).unwrap();
        assert!(!contact.pixel_accurate);
        assert_eq!(contact.point, IVec2::new(5, 5));
    }

    #[test]
    fn test_obstacle_top_checked_before_bottom() {
        let settings = Settings::default();
        let mut obstacle = Obstacle::new(1, ObstacleKind::Pipe, 100, &settings, &SolidShapes);
        obstacle.x = 40.0;
        obstacle.update(0.0);

        // Bird straddling the top segment's lower edge
        let bird = bird_at(45, 95, Some(Mask::full(10, 10)));
        assert_eq!(first_contact(&bird, &obstacle).unwrap().side, SegmentSide::Top);

        // Bird in the gap
        let bird = bird_at(45, 150, Some(Mask::full(10, 10)));
        assert!(!collides(&bird, &obstacle));

        // Bird in the bottom segment
        let bird = bird_at(45, 300, None);
        assert_eq!(
            first_contact(&bird, &obstacle).unwrap().side,
            SegmentSide::Bottom
        );
    }

    #[test]
    fn test_topless_obstacle_ignores_ceiling_area() {
        let settings = Settings::default();
        let mut obstacle = Obstacle::new(1, ObstacleKind::LampPost, 100, &settings, &BoxShapes);
        obstacle.x = 40.0;
        obstacle.update(0.0);

        let bird = bird_at(45, 20, None);
        assert!(!collides(&bird, &obstacle));
    }
}
