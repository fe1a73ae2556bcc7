//! Smooth piecewise cubic curve through a series' points.
//!
//! Each interior point `P[j]` gets a tangent estimated from its neighbours: the control point
//! on either side sits a quarter of the way towards the neighbouring point horizontally and
//! is offset vertically by `(P[j-1].y - P[j+1].y) / 8`, in opposite directions, so the two
//! handles are collinear with `P[j]` and the curve stays smooth through it. The first and last
//! points use themselves as control point, which keeps the curve from overshooting at the ends.

use super::mapper::Point;

/// One cubic segment, starting where the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub cp1: Point,
    pub cp2: Point,
    pub to: Point,
}

/// Minimum number of points a curve is drawn for.
pub const MIN_CURVE_POINTS: usize = 3;

/// Control points for the `n - 1` segments joining `points` in order.
///
/// Returns `None` for fewer than [`MIN_CURVE_POINTS`] points.
pub fn control_points(points: &[Point]) -> Option<Vec<CubicSegment>> {
    let n = points.len();
    if n < MIN_CURVE_POINTS {
        return None;
    }

    let mut segments: Vec<CubicSegment> = points
        .windows(2)
        .map(|w| CubicSegment {
            cp1: w[0],
            cp2: w[1],
            to: w[1],
        })
        .collect();

    for j in 1..n - 1 {
        let (prev, cur, next) = (points[j - 1], points[j], points[j + 1]);
        let dy = (prev.y - next.y) / 8.0;
        segments[j - 1].cp2 = Point::new((prev.x + 3.0 * cur.x) / 4.0, cur.y + dy);
        segments[j].cp1 = Point::new((next.x + 3.0 * cur.x) / 4.0, cur.y - dy);
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross(o: Point, a: Point, b: Point) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    #[test]
    fn too_few_points_yield_nothing() {
        assert!(control_points(&[]).is_none());
        assert!(control_points(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn collinear_points_give_a_straight_curve() {
        let pts = [
            Point::new(10.0, 100.0),
            Point::new(50.0, 80.0),
            Point::new(90.0, 60.0),
        ];
        let segs = control_points(&pts).unwrap();
        assert_eq!(segs.len(), 2);
        for s in &segs {
            for p in [s.cp1, s.cp2, s.to] {
                assert!(cross(pts[0], pts[2], p).abs() < 1e-9, "{p:?} off the line");
            }
        }
    }

    #[test]
    fn curve_passes_through_every_point_with_clamped_ends() {
        let pts = [
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 30.0),
            Point::new(30.0, 5.0),
        ];
        let segs = control_points(&pts).unwrap();
        assert_eq!(segs.len(), 3);
        for (s, p) in segs.iter().zip(&pts[1..]) {
            assert_eq!(s.to, *p);
        }
        assert_eq!(segs[0].cp1, pts[0]);
        assert_eq!(segs[2].cp2, pts[3]);
    }

    #[test]
    fn interior_handles_use_quarter_blend_and_eighth_slope() {
        let pts = [
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 30.0),
        ];
        let segs = control_points(&pts).unwrap();
        // dy = (10 - 30) / 8 = -2.5
        assert_eq!(segs[0].cp2, Point::new(7.5, -2.5));
        assert_eq!(segs[1].cp1, Point::new(12.5, 2.5));
        // the two handles around P[1] are collinear with it
        assert!(cross(pts[1], segs[0].cp2, segs[1].cp1).abs() < 1e-9);
    }
}
