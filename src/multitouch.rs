//! Pure two-finger geometry: given the tracked pair at the previous and
//! current frame, derive the pan/zoom/rotate deltas. Which two identifiers
//! are tracked is the session's business; nothing here holds state.

use crate::math::Point;
use crate::raw::TouchContact;

/// Below this inter-point distance the reference frame is treated as
/// degenerate and the scale stays neutral.
const MIN_REFERENCE_DISTANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchDelta {
    /// Midpoint of the current pair; the anchor for all three transforms.
    pub center: Point,
    /// Centroid translation since the previous frame.
    pub pan: Point,
    /// Inter-point angle difference in radians, positive counter-clockwise.
    pub angle: f64,
    /// Inter-point distance ratio; `1.0` when the reference is degenerate.
    pub scale: f64,
}

pub fn pinch_delta(from: &[Point; 2], to: &[Point; 2]) -> PinchDelta {
    let center = to[0].midpoint(&to[1]);
    let from_center = from[0].midpoint(&from[1]);
    let pan = Point::new(center.x - from_center.x, center.y - from_center.y);
    let angle = pair_angle(to) - pair_angle(from);
    let from_distance = from[0].distance(&from[1]);
    let scale = if from_distance < MIN_REFERENCE_DISTANCE {
        1.0
    } else {
        to[0].distance(&to[1]) / from_distance
    };
    PinchDelta { center, pan, angle, scale }
}

fn pair_angle(pair: &[Point; 2]) -> f64 {
    (pair[1].y - pair[0].y).atan2(pair[1].x - pair[0].x)
}

/// Finds the tracked identifiers in the current contact list. `None` when
/// either identifier vanished; the caller discards the frame rather than
/// guessing a replacement contact.
pub fn match_pair(contacts: &[TouchContact], pair: &[TouchContact; 2]) -> Option<[TouchContact; 2]> {
    let a = contacts.iter().find(|c| c.id == pair[0].id)?;
    let b = contacts.iter().find(|c| c.id == pair[1].id)?;
    Some([*a, *b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_keeps_scale_and_moves_center() {
        let from = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let to = [Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
        let d = pinch_delta(&from, &to);
        assert_eq!(d.scale, 1.0);
        assert!((d.angle - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(d.center, Point::new(0.0, 5.0));
        assert_eq!(d.pan, Point::new(-5.0, 5.0));
    }

    #[test]
    fn spread_doubles_scale() {
        let from = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let to = [Point::new(-2.0, 0.0), Point::new(6.0, 0.0)];
        let d = pinch_delta(&from, &to);
        assert_eq!(d.scale, 2.0);
        assert_eq!(d.angle, 0.0);
        assert_eq!(d.center, Point::new(2.0, 0.0));
        assert_eq!(d.pan, Point::new(0.0, 0.0));
    }

    #[test]
    fn degenerate_reference_distance_is_neutral() {
        let from = [Point::new(3.0, 3.0), Point::new(3.0, 3.0)];
        let to = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let d = pinch_delta(&from, &to);
        assert_eq!(d.scale, 1.0);
        assert!(d.scale.is_finite());
    }

    #[test]
    fn match_pair_requires_both_identifiers() {
        let pair = [
            TouchContact { id: 1, point: Point::new(0.0, 0.0) },
            TouchContact { id: 2, point: Point::new(10.0, 0.0) },
        ];
        let next = vec![
            TouchContact { id: 2, point: Point::new(12.0, 0.0) },
            TouchContact { id: 1, point: Point::new(1.0, 0.0) },
        ];
        let matched = match_pair(&next, &pair).unwrap();
        // Order follows the tracked pair, not the frame's contact list.
        assert_eq!(matched[0].id, 1);
        assert_eq!(matched[1].id, 2);

        let dropped = vec![TouchContact { id: 2, point: Point::new(12.0, 0.0) }];
        assert!(match_pair(&dropped, &pair).is_none());
    }
}
