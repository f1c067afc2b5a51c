//! Ray-casting point-in-polygon test.
//!
//! Flag reattachment and click-to-room picking both resolve a position to a
//! face with the even-odd (crossing parity) rule.

use crate::model::Vec2;

/// Number of polygon edges crossed by the horizontal ray from (px, py) going
/// right.
pub fn crossing_number(px: f32, py: f32, polygon: &[Vec2]) -> i32 {
    if polygon.len() < 3 {
        return 0;
    }

    let mut crossings = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        let y_crosses = (p1.y <= py && p2.y > py) || (p2.y <= py && p1.y > py);

        if y_crosses {
            let t = (py - p1.y) / (p2.y - p1.y);
            let x_intersect = p1.x + t * (p2.x - p1.x);

            if px < x_intersect {
                crossings += 1;
            }
        }
    }

    crossings
}

/// Check if a point is inside a polygon using the even-odd rule.
#[inline]
pub fn point_in_polygon(px: f32, py: f32, polygon: &[Vec2]) -> bool {
    crossing_number(px, py, polygon) % 2 == 1
}
