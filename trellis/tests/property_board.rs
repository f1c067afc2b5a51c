use proptest::prelude::*;
use trellis::geometry::tolerance::EPS_FACE_AREA;
use trellis::{Board, WallColor};

#[derive(Clone, Debug)]
enum Op {
    AddPoint { x: i16, y: i16 },
    MovePoint { idx: u16, dx: i8, dy: i8 },
    RemovePoint { idx: u16 },
    AddWall { a: u16, b: u16, color: u8 },
    RemoveWall { idx: u16 },
    SetColor { idx: u16, color: u8 },
    SetStart { x: i16, y: i16 },
    SetGoal { x: i16, y: i16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddPoint { x, y }),
        (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::MovePoint {
            idx,
            dx,
            dy,
        }),
        any::<u16>().prop_map(|idx| Op::RemovePoint { idx }),
        (any::<u16>(), any::<u16>(), 0u8..=2u8)
            .prop_map(|(a, b, color)| Op::AddWall { a, b, color }),
        any::<u16>().prop_map(|idx| Op::RemoveWall { idx }),
        (any::<u16>(), 0u8..=2u8).prop_map(|(idx, color)| Op::SetColor { idx, color }),
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::SetStart { x, y }),
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::SetGoal { x, y }),
    ]
}

#[derive(Default)]
struct ModelState {
    points: Vec<u32>,
    walls: Vec<u32>,
}

fn sync_state(b: &Board, state: &mut ModelState) {
    let (point_ids, _) = b.get_point_arrays();
    state.points = point_ids;
    state.walls = b.get_wall_arrays().ids;
}

fn color_of(v: u8) -> WallColor {
    match v {
        0 => WallColor::Red,
        1 => WallColor::Blue,
        _ => WallColor::Black,
    }
}

fn apply_op(b: &mut Board, state: &ModelState, op: Op) {
    match op {
        Op::AddPoint { x, y } => {
            let _ = b.add_point(x as f32 * 0.1, y as f32 * 0.1);
        }
        Op::MovePoint { idx, dx, dy } => {
            if state.points.is_empty() {
                return;
            }
            let pid = state.points[(idx as usize) % state.points.len()];
            if let Some((x, y)) = b.get_point(pid) {
                let _ = b.move_point(pid, x + dx as f32 * 0.05, y + dy as f32 * 0.05);
            }
        }
        Op::RemovePoint { idx } => {
            if state.points.is_empty() {
                return;
            }
            let pid = state.points[(idx as usize) % state.points.len()];
            let _ = b.remove_point(pid);
        }
        Op::AddWall { a, b: bb, color } => {
            if state.points.len() < 2 {
                return;
            }
            let aid = state.points[(a as usize) % state.points.len()];
            let bid = state.points[(bb as usize) % state.points.len()];
            let _ = b.add_wall(aid, bid, color_of(color));
        }
        Op::RemoveWall { idx } => {
            if state.walls.is_empty() {
                return;
            }
            let wid = state.walls[(idx as usize) % state.walls.len()];
            let _ = b.remove_wall(wid);
        }
        Op::SetColor { idx, color } => {
            if state.walls.is_empty() {
                return;
            }
            let wid = state.walls[(idx as usize) % state.walls.len()];
            let _ = b.set_wall_color(wid, color_of(color));
        }
        Op::SetStart { x, y } => {
            let _ = b.set_start_at(x as f32 * 0.1, y as f32 * 0.1);
        }
        Op::SetGoal { x, y } => {
            let _ = b.set_goal_at(x as f32 * 0.1, y as f32 * 0.1);
        }
    }
}

fn assert_invariants(b: &mut Board) {
    // No dangling references
    let walls = b.get_wall_arrays();
    for i in 0..walls.ids.len() {
        let a = walls.endpoints[2 * i];
        let bb = walls.endpoints[2 * i + 1];
        assert!(b.get_point(a).is_some(), "wall {} missing point {}", i, a);
        assert!(b.get_point(bb).is_some(), "wall {} missing point {}", i, bb);
        assert_ne!(a, bb, "wall {} connects identical points", i);
    }

    // Room structure: one outer face at most, always stored last, and no
    // degenerate enclosed boundaries.
    let rooms = b.rooms().to_vec();
    let outer_count = rooms.iter().filter(|r| r.is_outer()).count();
    if rooms.is_empty() {
        assert_eq!(outer_count, 0);
    } else {
        assert_eq!(outer_count, 1, "exactly one outer face");
        assert!(rooms.last().map(|r| r.is_outer()).unwrap_or(false));
    }
    for room in &rooms {
        let data = room.data();
        let mut distinct = data.boundary.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() >= 3, "face with {} points", distinct.len());
        assert!(
            data.area.abs() >= EPS_FACE_AREA,
            "degenerate face area {}",
            data.area
        );
        // Winding discipline: enclosed rooms are counter-clockwise, the
        // outer walk clockwise; other components' unbounded walks must not
        // leak through as negative-area rooms.
        if room.is_outer() {
            assert!(data.area < 0.0, "outer face with area {}", data.area);
        } else {
            assert!(data.area > 0.0, "enclosed face with area {}", data.area);
        }
        assert_eq!(data.boundary.len(), data.polygon.len());
    }

    // Passages refer to live walls and live, distinct rooms.
    for p in b.passages() {
        assert!(b.get_wall(p.wall).is_some());
        assert_ne!(p.a, p.b);
        assert!(b.room(p.a).is_some());
        assert!(b.room(p.b).is_some());
    }

    // Flags only ever land on enclosed rooms.
    for id in [b.start_room(), b.goal_room()].into_iter().flatten() {
        let room = b.room(id).expect("flagged room exists");
        assert!(!room.is_outer(), "flag in outer face");
    }

    // Recomputing without edits is stable.
    assert_eq!(b.rooms_json(), b.rooms_json());
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..30)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 10_000, .. ProptestConfig::default() })]
    #[test]
    fn board_edit_invariants(seq in sequence_strategy()) {
        let mut board = Board::new();
        let mut state = ModelState::default();
        for op in seq {
            sync_state(&board, &mut state);
            apply_op(&mut board, &state, op);
        }
        assert_invariants(&mut board);
    }
}
