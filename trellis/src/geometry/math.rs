use crate::model::Vec2;

pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1;
    let vy = y2 - y1;
    let wx = px - x1;
    let wy = py - y1;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 {
        t = 0.0;
    } else if t > 1.0 {
        t = 1.0;
    }
    let projx = x1 + t * vx;
    let projy = y1 + t * vy;
    let dx = px - projx;
    let dy = py - projy;
    (dx * dx + dy * dy, t)
}

/// Shoelace area of a closed polygon; sign follows winding.
pub fn polygon_area(poly: &[Vec2]) -> f32 {
    let mut a = 0.0f32;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        a += poly[i].x * poly[j].y - poly[j].x * poly[i].y;
    }
    0.5 * a
}

/// Arithmetic mean of the boundary points. Good enough as a room label
/// position and as the remembered anchor for flag reattachment.
pub fn boundary_mean(poly: &[Vec2]) -> Vec2 {
    if poly.is_empty() {
        return Vec2 { x: 0.0, y: 0.0 };
    }
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for p in poly {
        cx += p.x;
        cy += p.y;
    }
    let n = poly.len() as f32;
    Vec2 {
        x: cx / n,
        y: cy / n,
    }
}
