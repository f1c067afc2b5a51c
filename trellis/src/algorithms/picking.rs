use crate::algorithms::winding::point_in_polygon;
use crate::geometry::math::seg_distance_sq;
use crate::model::{Room, RoomId, Vec2, Wall};

/// Editor hit-test result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pick {
    Point { id: u32, dist: f32 },
    Wall { id: u32, t: f32, dist: f32 },
}

/// Points first, then walls, nearest within tolerance wins.
pub fn pick_impl(points: &[Option<Vec2>], walls: &[Option<Wall>], x: f32, y: f32, tol: f32) -> Option<Pick> {
    let tol2 = tol * tol;
    let mut best_point: Option<(u32, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        if let Some(p) = p {
            let dx = p.x - x;
            let dy = p.y - y;
            let d2 = dx * dx + dy * dy;
            if d2 <= tol2 && best_point.map_or(true, |(_, bd)| d2 < bd) {
                best_point = Some((i as u32, d2));
            }
        }
    }
    if let Some((id, d2)) = best_point {
        return Some(Pick::Point { id, dist: d2.sqrt() });
    }

    let mut best_wall: Option<(u32, f32, f32)> = None;
    for (i, w) in walls.iter().enumerate() {
        if let Some(w) = w {
            let (Some(a), Some(b)) = (
                points.get(w.a as usize).and_then(|p| *p),
                points.get(w.b as usize).and_then(|p| *p),
            ) else {
                continue;
            };
            let (d2, t) = seg_distance_sq(x, y, a.x, a.y, b.x, b.y);
            if d2 <= tol2 && best_wall.map_or(true, |(_, bd, _)| d2 < bd) {
                best_wall = Some((i as u32, d2, t));
            }
        }
    }
    if let Some((id, d2, t)) = best_wall {
        return Some(Pick::Wall { id, t, dist: d2.sqrt() });
    }
    None
}

/// Resolve a board position to a room. The smallest enclosed face containing
/// the point wins (nested faces resolve to the innermost); anything else is
/// the outer room. `None` when no rooms exist at all.
pub fn room_at(rooms: &[Room], x: f32, y: f32) -> Option<RoomId> {
    if rooms.is_empty() {
        return None;
    }
    let mut best: Option<(u32, f32)> = None;
    let mut enclosed = 0u32;
    for room in rooms {
        if room.is_outer() {
            continue;
        }
        let id = enclosed;
        enclosed += 1;
        let data = room.data();
        if point_in_polygon(x, y, &data.polygon) {
            let a = data.area.abs();
            if best.map_or(true, |(_, ba)| a < ba) {
                best = Some((id, a));
            }
        }
    }
    Some(match best {
        Some((id, _)) => RoomId::Enclosed(id),
        None => RoomId::Outer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::faces::extract_faces;
    use crate::model::WallColor;

    fn square_board() -> (Vec<Option<Vec2>>, Vec<Option<Wall>>) {
        let points = vec![
            Some(Vec2 { x: 0.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 10.0 }),
            Some(Vec2 { x: 0.0, y: 10.0 }),
        ];
        let walls = vec![
            Some(Wall { a: 0, b: 1, color: WallColor::Red }),
            Some(Wall { a: 1, b: 2, color: WallColor::Blue }),
            Some(Wall { a: 2, b: 3, color: WallColor::Red }),
            Some(Wall { a: 3, b: 0, color: WallColor::Blue }),
        ];
        (points, walls)
    }

    #[test]
    fn pick_prefers_points_over_walls() {
        let (points, walls) = square_board();
        match pick_impl(&points, &walls, 0.5, 0.4, 2.0) {
            Some(Pick::Point { id: 0, .. }) => {}
            other => panic!("expected point 0, got {:?}", other),
        }
        match pick_impl(&points, &walls, 5.0, 0.5, 2.0) {
            Some(Pick::Wall { id: 0, .. }) => {}
            other => panic!("expected wall 0, got {:?}", other),
        }
        assert!(pick_impl(&points, &walls, 50.0, 50.0, 2.0).is_none());
    }

    #[test]
    fn room_at_inside_and_outside() {
        let (points, walls) = square_board();
        let rooms = extract_faces(&points, &walls);
        assert_eq!(room_at(&rooms, 5.0, 5.0), Some(RoomId::Enclosed(0)));
        assert_eq!(room_at(&rooms, 50.0, 5.0), Some(RoomId::Outer));
        assert_eq!(room_at(&[], 5.0, 5.0), None);
    }
}
