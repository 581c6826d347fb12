//! Vector math behind the joystick: power, 8-way direction and ring clamping.
//!
//! All functions here are pure. Coordinates follow screen conventions (Y grows
//! downward), while angles follow the math convention where "up" is 90°.
//!
//! # Key Functions
//!
//! - [`power`]: Normalized magnitude of an offset relative to the ring radius
//! - [`direction`]: 8-way sector lookup for an offset
//! - [`deflect`]: Full decomposition of a drag vector into a clamped offset,
//!   an angle in [0, 360) and a direction

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_8, PI};
use std::fmt;
use std::ops::{Add, Sub};

/// 2D point or vector in component-local or global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Per-axis scale factor applied to a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same factor on both axes.
    pub const fn uniform(factor: f32) -> Self {
        Self { x: factor, y: factor }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// One of eight 45° sectors around the ring center.
///
/// Screen Y grows downward, so a positive Y offset points to the `Bottom`
/// half of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// All directions, clockwise on screen starting from `Right`.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
    ];

    /// Lowercase tag used in serialized events and in the visualizer readout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::TopLeft => "top_left",
            Direction::TopRight => "top_right",
            Direction::BottomLeft => "bottom_left",
            Direction::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of decomposing a drag vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    /// Offset from the ring center, clamped to the ring radius
    pub offset: Point,
    /// Angle in degrees, [0, 360), counter-clockwise from `Right` with "up" at 90°
    pub angle: f32,
    pub direction: Direction,
}

/// Normalized drag magnitude in [0.0, 1.0].
///
/// Saturates at 1.0 once the point is at or beyond `outer_radius`. A
/// non-positive or non-finite radius has no meaningful travel, so the power
/// is 0.0 instead of NaN or infinity.
///
/// # Example
/// ```
/// use vjoystick::geometry::{power, Point};
///
/// assert_eq!(power(Point::ZERO, 48.0), 0.0);
/// assert_eq!(power(Point::new(480.0, 0.0), 48.0), 1.0);
/// assert_eq!(power(Point::new(10.0, 0.0), 0.0), 0.0);
/// ```
pub fn power(point: Point, outer_radius: f32) -> f32 {
    if !(outer_radius.is_finite() && outer_radius > 0.0) {
        return 0.0;
    }
    (point.length() / outer_radius).min(1.0)
}

/// Map an offset onto one of the 8 direction sectors.
///
/// Sectors are 45° wide with `Right` centered on 0 radians; boundaries sit at
/// odd multiples of π/8. Each sector includes its lower bound and excludes its
/// upper bound, except `Left` which wraps around ±π. The zero vector maps to
/// `Right` (atan2(0, 0) is 0).
///
/// # Example
/// ```
/// use vjoystick::geometry::{direction, Direction, Point};
///
/// assert_eq!(direction(Point::new(10.0, 10.0)), Direction::BottomRight);
/// assert_eq!(direction(Point::new(-100.0, -1.0)), Direction::Left);
/// ```
pub fn direction(point: Point) -> Direction {
    let rad = point.y.atan2(point.x); // [-PI, PI]

    if (-FRAC_PI_8..FRAC_PI_8).contains(&rad) {
        Direction::Right
    } else if (FRAC_PI_8..3.0 * FRAC_PI_8).contains(&rad) {
        Direction::BottomRight
    } else if (3.0 * FRAC_PI_8..5.0 * FRAC_PI_8).contains(&rad) {
        Direction::Bottom
    } else if (5.0 * FRAC_PI_8..7.0 * FRAC_PI_8).contains(&rad) {
        Direction::BottomLeft
    } else if rad >= 7.0 * FRAC_PI_8 || rad < -7.0 * FRAC_PI_8 {
        Direction::Left
    } else if (-7.0 * FRAC_PI_8..-5.0 * FRAC_PI_8).contains(&rad) {
        Direction::TopLeft
    } else if (-5.0 * FRAC_PI_8..-3.0 * FRAC_PI_8).contains(&rad) {
        Direction::Top
    } else {
        Direction::TopRight
    }
}

/// Decompose a drag vector (pointer minus ring center) into a clamped offset,
/// an angle and a direction.
///
/// Returns `None` for the zero vector: the handle stays where it is and no
/// change is reported.
///
/// Axis-aligned vectors clamp their single component to `outer_radius` and
/// report a cardinal angle (0°, 90°, 180° or 270°). Other vectors are clamped
/// onto the ring along their own direction when they reach past it.
///
/// # Arguments
/// * `side` - Vector from the ring center to the pointer, local coordinates
/// * `outer_radius` - Maximum travel of the handle center
pub fn deflect(side: Point, outer_radius: f32) -> Option<Deflection> {
    if side.is_zero() {
        return None;
    }

    if side.x == 0.0 {
        let reach = side.y.abs().min(outer_radius);
        let (offset_y, angle, direction) = if side.y > 0.0 {
            (reach, 270.0, Direction::Bottom)
        } else {
            (-reach, 90.0, Direction::Top)
        };
        return Some(Deflection {
            offset: Point::new(0.0, offset_y),
            angle,
            direction,
        });
    }

    if side.y == 0.0 {
        let reach = side.x.abs().min(outer_radius);
        let (offset_x, angle, direction) = if side.x > 0.0 {
            (reach, 0.0, Direction::Right)
        } else {
            (-reach, 180.0, Direction::Left)
        };
        return Some(Deflection {
            offset: Point::new(offset_x, 0.0),
            angle,
            direction,
        });
    }

    let radian = (side.y / side.x).abs().atan();
    let base_angle = radian.to_degrees();

    let (center_x, center_y) =
        if side.x * side.x + side.y * side.y >= outer_radius * outer_radius {
            // Past the ring: project onto the boundary along the same heading
            (outer_radius * radian.cos(), outer_radius * radian.sin())
        } else {
            (side.x.abs().min(outer_radius), side.y.abs().min(outer_radius))
        };

    let offset = Point::new(center_x.copysign(side.x), center_y.copysign(side.y));
    let angle = quadrant_angle(side, base_angle);

    Some(Deflection {
        offset,
        angle,
        direction: direction(offset),
    })
}

/// Lift a first-quadrant angle into [0, 360) by the sign pattern of `side`.
///
/// | side.x | side.y | angle         |
/// |--------|--------|---------------|
/// | +      | -      | base          |
/// | -      | -      | 180 - base    |
/// | -      | +      | 180 + base    |
/// | +      | +      | 360 - base    |
fn quadrant_angle(side: Point, base: f32) -> f32 {
    let angle = match (side.x > 0.0, side.y > 0.0) {
        (true, false) => base,
        (false, false) => 180.0 - base,
        (false, true) => base + 180.0,
        (true, true) => 360.0 - base,
    };
    // 360 - tiny rounds up to 360 in f32
    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Angle of a direction's sector center in radians, screen convention.
///
/// Used by the visualizer to highlight the active sector.
pub fn sector_center(direction: Direction) -> f32 {
    let index = Direction::ALL
        .iter()
        .position(|d| *d == direction)
        .unwrap_or(0) as f32;
    let rad = index * 2.0 * FRAC_PI_8;
    if rad > PI {
        rad - 2.0 * PI
    } else {
        rad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RADIUS: f32 = 48.0;

    #[test]
    fn test_power_zero_at_origin() {
        assert_eq!(power(Point::ZERO, RADIUS), 0.0);
    }

    #[test]
    fn test_power_proportional_inside_ring() {
        let p1 = power(Point::new(10.0, 0.0), RADIUS);
        let p2 = power(Point::new(20.0, 0.0), RADIUS);
        assert!(p2 > p1);
        assert!((p1 - 10.0 / 48.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_diagonal() {
        let expected = (200.0_f32).sqrt() / RADIUS;
        assert!((power(Point::new(10.0, 10.0), RADIUS) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_power_caps_at_one() {
        assert_eq!(power(Point::new(RADIUS * 10.0, RADIUS * 10.0), RADIUS), 1.0);
        assert!((power(Point::new(RADIUS, 0.0), RADIUS) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_with_degenerate_radius() {
        assert_eq!(power(Point::ZERO, 0.0), 0.0);
        assert_eq!(power(Point::new(5.0, 5.0), 0.0), 0.0);
        assert_eq!(power(Point::new(5.0, 5.0), -3.0), 0.0);
        assert_eq!(power(Point::new(5.0, 5.0), f32::NAN), 0.0);
    }

    #[test]
    fn test_direction_cardinals() {
        assert_eq!(direction(Point::new(10.0, 0.0)), Direction::Right);
        assert_eq!(direction(Point::new(0.0, 10.0)), Direction::Bottom);
        assert_eq!(direction(Point::new(0.0, -10.0)), Direction::Top);
        assert_eq!(direction(Point::new(-10.0, 0.0)), Direction::Left);
    }

    #[test]
    fn test_direction_diagonals() {
        assert_eq!(direction(Point::new(10.0, 10.0)), Direction::BottomRight);
        assert_eq!(direction(Point::new(-10.0, -10.0)), Direction::TopLeft);
        assert_eq!(direction(Point::new(-10.0, 10.0)), Direction::BottomLeft);
        assert_eq!(direction(Point::new(10.0, -10.0)), Direction::TopRight);
    }

    #[test]
    fn test_direction_near_boundaries() {
        assert_eq!(direction(Point::new(100.0, 1.0)), Direction::Right);
        assert_eq!(direction(Point::new(100.0, 50.0)), Direction::BottomRight);
        assert_eq!(direction(Point::new(1.0, 100.0)), Direction::Bottom);
        assert_eq!(direction(Point::new(-100.0, -1.0)), Direction::Left);
        assert_eq!(direction(Point::new(-10.0, -1.0)), Direction::Left);
        assert_eq!(direction(Point::new(0.001, 0.001)), Direction::BottomRight);
    }

    #[test]
    fn test_direction_zero_vector_is_right() {
        assert_eq!(direction(Point::ZERO), Direction::Right);
    }

    #[test]
    fn test_direction_tags() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Top.to_string(), "top");
        assert_eq!(Direction::Bottom.to_string(), "bottom");
        assert_eq!(Direction::TopLeft.to_string(), "top_left");
        assert_eq!(Direction::TopRight.to_string(), "top_right");
        assert_eq!(Direction::BottomLeft.to_string(), "bottom_left");
        assert_eq!(Direction::BottomRight.to_string(), "bottom_right");
        assert_eq!(
            serde_json::to_string(&Direction::BottomRight).unwrap(),
            "\"bottom_right\""
        );
    }

    #[test]
    fn test_deflect_zero_vector() {
        assert_eq!(deflect(Point::ZERO, RADIUS), None);
    }

    #[test]
    fn test_deflect_axis_aligned() {
        let right = deflect(Point::new(10.0, 0.0), RADIUS).unwrap();
        assert_eq!(right.offset, Point::new(10.0, 0.0));
        assert_eq!(right.angle, 0.0);
        assert_eq!(right.direction, Direction::Right);

        let left = deflect(Point::new(-100.0, 0.0), RADIUS).unwrap();
        assert_eq!(left.offset, Point::new(-RADIUS, 0.0));
        assert_eq!(left.angle, 180.0);
        assert_eq!(left.direction, Direction::Left);

        let bottom = deflect(Point::new(0.0, 70.0), RADIUS).unwrap();
        assert_eq!(bottom.offset, Point::new(0.0, RADIUS));
        assert_eq!(bottom.angle, 270.0);
        assert_eq!(bottom.direction, Direction::Bottom);

        let top = deflect(Point::new(0.0, -5.0), RADIUS).unwrap();
        assert_eq!(top.offset, Point::new(0.0, -5.0));
        assert_eq!(top.angle, 90.0);
        assert_eq!(top.direction, Direction::Top);
    }

    #[test]
    fn test_deflect_clamps_outside_ring() {
        let d = deflect(Point::new(100.0, 100.0), RADIUS).unwrap();
        assert!((d.offset.length() - RADIUS).abs() < 1e-3);
        assert!((d.offset.x - d.offset.y).abs() < 1e-3);
        assert!((d.angle - 315.0).abs() < 1e-3);
        assert_eq!(d.direction, Direction::BottomRight);
    }

    #[test]
    fn test_deflect_keeps_inside_ring() {
        let d = deflect(Point::new(-10.0, -1.0), RADIUS).unwrap();
        assert_eq!(d.offset, Point::new(-10.0, -1.0));
        assert_eq!(d.direction, Direction::Left);
        // (-, -) quadrant: 180 - atan(0.1)
        assert!((d.angle - (180.0 - 0.1_f32.atan().to_degrees())).abs() < 1e-3);
    }

    #[test]
    fn test_quadrant_angles() {
        let base = 30.0;
        assert_eq!(quadrant_angle(Point::new(1.0, -1.0), base), 30.0);
        assert_eq!(quadrant_angle(Point::new(-1.0, -1.0), base), 150.0);
        assert_eq!(quadrant_angle(Point::new(-1.0, 1.0), base), 210.0);
        assert_eq!(quadrant_angle(Point::new(1.0, 1.0), base), 330.0);
    }

    #[test]
    fn test_sector_centers_round_trip() {
        for dir in Direction::ALL {
            let rad = sector_center(dir);
            let probe = Point::new(rad.cos() * 10.0, rad.sin() * 10.0);
            assert_eq!(direction(probe), dir, "sector center of {dir}");
        }
    }

    fn finite_coord() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0
    }

    proptest! {
        #[test]
        fn prop_power_in_unit_range(x in finite_coord(), y in finite_coord()) {
            let p = power(Point::new(x, y), RADIUS);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_power_symmetric(x in finite_coord(), y in finite_coord()) {
            let a = power(Point::new(x, y), RADIUS);
            let b = power(Point::new(-x, -y), RADIUS);
            prop_assert!((a - b).abs() < 1e-6);
        }

        #[test]
        fn prop_power_monotonic_along_ray(
            x in finite_coord(),
            y in finite_coord(),
            k in 1.0f32..4.0,
        ) {
            let near = power(Point::new(x, y), RADIUS);
            let far = power(Point::new(x * k, y * k), RADIUS);
            prop_assert!(far + 1e-6 >= near);
        }

        #[test]
        fn prop_deflection_never_leaves_ring(x in finite_coord(), y in finite_coord()) {
            if let Some(d) = deflect(Point::new(x, y), RADIUS) {
                prop_assert!(d.offset.length() <= RADIUS + 1e-3);
                prop_assert!((0.0..360.0).contains(&d.angle));
            }
        }

        #[test]
        fn prop_direction_matches_sector(angle in -PI..PI) {
            let probe = Point::new(angle.cos() * 50.0, angle.sin() * 50.0);
            let rad = probe.y.atan2(probe.x);
            // Sector index counted clockwise on screen from Right
            let shifted = (rad + FRAC_PI_8).rem_euclid(2.0 * PI);
            let index = ((shifted / (2.0 * FRAC_PI_8)) as usize).min(7);
            prop_assert_eq!(direction(probe), Direction::ALL[index]);
        }
    }
}
