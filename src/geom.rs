//! Shared geometry utilities.

use kurbo::Point;

/// Arithmetic midpoint of two points. Finite inputs give a finite result.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new(f64::midpoint(a.x, b.x), f64::midpoint(a.y, b.y))
}

/// Arithmetic mean of a non-empty set of points.
///
/// Returns `None` for an empty set.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    if sx.is_finite() && sy.is_finite() {
        return Some(Point::new(sx / n, sy / n));
    }
    // The plain sum overflowed near the f64 limits: sum halved terms, then
    // clamp, since the mean of finite values is itself finite.
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x / (2.0 * n), sy + p.y / (2.0 * n)));
    let clamp = |v: f64| (v * 2.0).clamp(-f64::MAX, f64::MAX);
    Some(Point::new(clamp(sx), clamp(sy)))
}
