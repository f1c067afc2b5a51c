//! Face extraction over the planar subdivision induced by points and walls.
//!
//! Faces are derived purely from the combinatorial embedding: incident walls
//! are sorted by angle around each point and every directed wall half is
//! traced to the face on its left. No segment intersection is computed; walls
//! are assumed to be drawn without crossings.

use std::collections::HashMap;

use log::debug;

use crate::geometry::math::{boundary_mean, polygon_area};
use crate::geometry::tolerance::EPS_FACE_AREA;
use crate::model::{FaceData, Room, Vec2, Wall};

fn pos(points: &[Option<Vec2>], id: u32) -> Option<Vec2> {
    points.get(id as usize).and_then(|p| *p)
}

/// Compute the complete set of faces, including the unbounded outer face.
///
/// Pure recomputation: slotted input collections in, rooms out. Enclosed
/// rooms come first (their index is their id); the outer face, the largest
/// negative-winding trace, is always the last element. On a disconnected
/// board only one unbounded walk survives as `Outer`; the other components'
/// unbounded walks are discarded. Returns an empty vector when no face
/// closes.
pub fn extract_faces(points: &[Option<Vec2>], walls: &[Option<Wall>]) -> Vec<Room> {
    let live_points = points.iter().filter(|p| p.is_some()).count();

    // Directed halves: (from, to, wall id). A wall with a missing endpoint
    // contributes nothing; points with no incident walls never appear.
    let mut halves: Vec<(u32, u32, u32)> = Vec::new();
    for (wid, w) in walls.iter().enumerate() {
        let Some(w) = w else { continue };
        if pos(points, w.a).is_none() || pos(points, w.b).is_none() {
            continue;
        }
        halves.push((w.a, w.b, wid as u32));
        halves.push((w.b, w.a, wid as u32));
    }

    // Rotational order: per point, incident halves sorted by polar angle.
    let mut adj: HashMap<u32, Vec<(u32, f32, usize)>> = HashMap::new();
    for (i, &(u, v, _)) in halves.iter().enumerate() {
        let (Some(pu), Some(pv)) = (pos(points, u), pos(points, v)) else {
            continue;
        };
        let ang = (pv.y - pu.y).atan2(pv.x - pu.x);
        adj.entry(u).or_default().push((v, ang, i));
    }
    for lst in adj.values_mut() {
        lst.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)).then(a.2.cmp(&b.2)));
    }

    let m = halves.len();
    let mut used = vec![false; m];
    let mut faces: Vec<FaceData> = Vec::new();
    // Guards malformed/dangling input, not ordinary traces.
    let step_cap = 2 * live_points.max(1);

    for start in 0..m {
        if used[start] {
            continue;
        }
        let mut cycle: Vec<u32> = Vec::new();
        let mut closed = false;
        let mut i_he = start;
        let mut steps = 0usize;
        loop {
            used[i_he] = true;
            let (u, v, w) = halves[i_he];
            cycle.push(u);
            let Some(lst) = adj.get(&v) else {
                break;
            };
            // Locate the reverse half (v -> u over the same wall).
            let Some(back) = lst.iter().position(|&(n, _, h)| n == u && halves[h].2 == w) else {
                break; // no reciprocal back-edge: discard the partial trace
            };
            // Next edge in face: the one immediately preceding the back-edge
            // in cyclic angular order.
            let next = lst[(back + lst.len() - 1) % lst.len()].2;
            if next == start {
                closed = true;
                break;
            }
            if used[next] {
                break;
            }
            steps += 1;
            if steps >= step_cap {
                break;
            }
            i_he = next;
        }
        if !closed {
            continue;
        }
        let mut distinct = cycle.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 3 {
            continue; // digons and back-and-forth walks are not rooms
        }
        let polygon: Vec<Vec2> = match cycle
            .iter()
            .map(|&pid| pos(points, pid))
            .collect::<Option<Vec<_>>>()
        {
            Some(p) => p,
            None => continue,
        };
        let area = polygon_area(&polygon);
        if !area.is_finite() || area.abs() < EPS_FACE_AREA {
            continue;
        }
        let centroid = boundary_mean(&polygon);
        faces.push(FaceData {
            boundary: cycle,
            polygon,
            area,
            centroid,
        });
    }

    if faces.is_empty() {
        return Vec::new();
    }

    // The trace rule walks enclosed faces with positive winding and every
    // component's unbounded walk with negative winding. The global outer
    // face is the negative trace of largest magnitude; remaining negative
    // traces belong to other components' unbounded walks and correspond to
    // no room, so they are dropped.
    let mut outer: Option<usize> = None;
    for (i, f) in faces.iter().enumerate() {
        if f.area < 0.0 && outer.map_or(true, |o| f.area < faces[o].area) {
            outer = Some(i);
        }
    }
    let Some(outer) = outer else {
        return Vec::new(); // every closed cycle is walked both ways
    };
    let outer_face = faces.remove(outer);
    let mut rooms: Vec<Room> = faces
        .into_iter()
        .filter(|f| f.area > 0.0)
        .map(Room::Enclosed)
        .collect();
    rooms.push(Room::Outer(outer_face));
    debug!(
        "extract_faces: {} halves -> {} rooms ({} enclosed)",
        m,
        rooms.len(),
        rooms.len() - 1
    );
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WallColor;

    fn wall(a: u32, b: u32) -> Option<Wall> {
        Some(Wall {
            a,
            b,
            color: WallColor::Red,
        })
    }

    fn square() -> (Vec<Option<Vec2>>, Vec<Option<Wall>>) {
        let points = vec![
            Some(Vec2 { x: 0.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 10.0 }),
            Some(Vec2 { x: 0.0, y: 10.0 }),
        ];
        let walls = vec![wall(0, 1), wall(1, 2), wall(2, 3), wall(3, 0)];
        (points, walls)
    }

    #[test]
    fn square_yields_one_enclosed_and_outer() {
        let (points, walls) = square();
        let rooms = extract_faces(&points, &walls);
        assert_eq!(rooms.len(), 2);
        assert!(!rooms[0].is_outer());
        assert!(rooms[1].is_outer());
        assert!((rooms[0].data().area.abs() - 100.0).abs() < 1.0);
        let c = rooms[0].data().centroid;
        assert!((c.x - 5.0).abs() < 1e-3 && (c.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn outer_face_has_max_abs_area() {
        let (points, walls) = square();
        let rooms = extract_faces(&points, &walls);
        let outer_area = rooms.last().unwrap().data().area.abs();
        for r in &rooms {
            assert!(r.data().area.abs() <= outer_area);
        }
        assert_eq!(rooms.iter().filter(|r| r.is_outer()).count(), 1);
    }

    #[test]
    fn two_cells_share_a_wall() {
        // Two unit squares side by side: 6 points, 7 walls, 3 faces.
        let points = vec![
            Some(Vec2 { x: 0.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 0.0 }),
            Some(Vec2 { x: 20.0, y: 0.0 }),
            Some(Vec2 { x: 20.0, y: 10.0 }),
            Some(Vec2 { x: 10.0, y: 10.0 }),
            Some(Vec2 { x: 0.0, y: 10.0 }),
        ];
        let walls = vec![
            wall(0, 1),
            wall(1, 2),
            wall(2, 3),
            wall(3, 4),
            wall(4, 5),
            wall(5, 0),
            wall(1, 4),
        ];
        let rooms = extract_faces(&points, &walls);
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms.iter().filter(|r| r.is_outer()).count(), 1);
        for r in rooms.iter().filter(|r| !r.is_outer()) {
            assert!((r.data().area.abs() - 100.0).abs() < 1.0);
            assert!(r.data().boundary.len() >= 3);
        }
    }

    #[test]
    fn dangling_wall_produces_no_face() {
        let points = vec![Some(Vec2 { x: 0.0, y: 0.0 }), Some(Vec2 { x: 10.0, y: 0.0 })];
        let walls = vec![wall(0, 1)];
        let rooms = extract_faces(&points, &walls);
        assert!(rooms.is_empty());
    }

    #[test]
    fn dangling_spur_on_cycle_is_tolerated() {
        // Square plus a spur sticking out of one corner.
        let (mut points, mut walls) = square();
        points.push(Some(Vec2 { x: 15.0, y: -5.0 }));
        walls.push(wall(1, 4));
        let rooms = extract_faces(&points, &walls);
        // The square's face must survive the spur.
        assert!(rooms
            .iter()
            .any(|r| !r.is_outer() && (r.data().area.abs() - 100.0).abs() < 1.0));
    }

    #[test]
    fn digon_excluded() {
        let points = vec![Some(Vec2 { x: 0.0, y: 0.0 }), Some(Vec2 { x: 10.0, y: 0.0 })];
        let walls = vec![wall(0, 1), wall(0, 1)];
        let rooms = extract_faces(&points, &walls);
        assert!(rooms.is_empty());
    }

    #[test]
    fn non_finite_coordinates_do_not_panic() {
        let points = vec![
            Some(Vec2 { x: f32::NAN, y: 0.0 }),
            Some(Vec2 { x: 0.0, y: 0.0 }),
            Some(Vec2 { x: 10.0, y: 0.0 }),
        ];
        let walls = vec![wall(0, 1), wall(1, 2)];
        assert!(extract_faces(&points, &walls).is_empty());
    }

    #[test]
    fn disconnected_loops_yield_no_phantom_rooms() {
        // Two separate closed squares: each component contributes one
        // unbounded walk, but only one room list entry may be Outer and no
        // negative-area leftovers may pose as rooms.
        let (mut points, mut walls) = square();
        let base = points.len() as u32;
        for &(x, y) in &[(100.0, 0.0), (110.0, 0.0), (110.0, 10.0), (100.0, 10.0)] {
            points.push(Some(Vec2 { x, y }));
        }
        walls.push(wall(base, base + 1));
        walls.push(wall(base + 1, base + 2));
        walls.push(wall(base + 2, base + 3));
        walls.push(wall(base + 3, base));

        let rooms = extract_faces(&points, &walls);
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms.iter().filter(|r| r.is_outer()).count(), 1);
        for r in rooms.iter().filter(|r| !r.is_outer()) {
            assert!(r.data().area > 0.0);
            assert!((r.data().area - 100.0).abs() < 1.0);
        }
    }

    #[test]
    fn isolated_points_ignored() {
        let (mut points, walls) = square();
        points.push(Some(Vec2 { x: 50.0, y: 50.0 }));
        points.push(Some(Vec2 { x: -3.0, y: 7.0 }));
        let rooms = extract_faces(&points, &walls);
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn extraction_is_idempotent() {
        let (points, walls) = square();
        let a = extract_faces(&points, &walls);
        let b = extract_faces(&points, &walls);
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.iter().zip(b.iter()) {
            assert_eq!(ra.is_outer(), rb.is_outer());
            assert_eq!(ra.data().boundary, rb.data().boundary);
        }
    }
}
