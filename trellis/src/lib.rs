pub mod model;
pub mod geometry {
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod faces;
    pub mod generator;
    pub mod picking;
    pub mod solver;
    pub mod winding;
}
mod json;

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use algorithms::{faces, generator, picking, solver};
use geometry::tolerance::EPS_POS;

pub use algorithms::picking::Pick;
pub use json::{Level, LevelWall};
pub use model::{
    FaceData, MoveOutcome, Passage, PlayerState, Room, RoomId, Vec2, Wall, WallColor,
};

/// Owning controller for the editor state. Points and walls are the
/// authoritative collections; rooms are derived and recomputed lazily after
/// edits, with start/goal flags reattached by remembered centroid.
pub struct Board {
    pub(crate) points: Vec<Option<Vec2>>, // id is index
    pub(crate) walls: Vec<Option<Wall>>,  // id is index
    pub(crate) rooms: Vec<Room>,          // enclosed first, outer last
    geom_ver: u64,
    rooms_ver: u64, // geometry version the rooms were built at
    start: Option<RoomId>,
    goal: Option<RoomId>,
    start_anchor: Option<Vec2>,
    goal_anchor: Option<Vec2>,
    player: Option<PlayerState>,
}

pub struct WallArrays {
    pub ids: Vec<u32>,
    pub endpoints: Vec<u32>,
    pub colors: Vec<u8>,
}

pub fn color_to_u8(c: WallColor) -> u8 {
    match c {
        WallColor::Red => 0,
        WallColor::Blue => 1,
        WallColor::Black => 2,
    }
}

pub fn color_from_u8(v: u8) -> Option<WallColor> {
    match v {
        0 => Some(WallColor::Red),
        1 => Some(WallColor::Blue),
        2 => Some(WallColor::Black),
        _ => None,
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            points: Vec::new(),
            walls: Vec::new(),
            rooms: Vec::new(),
            geom_ver: 1,
            rooms_ver: 0,
            start: None,
            goal: None,
            start_anchor: None,
            goal_anchor: None,
            player: None,
        }
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver += 1;
    }

    // --- points -----------------------------------------------------------

    /// Add a point and return its id. Non-finite coordinates are rejected;
    /// they would poison every angle and area downstream.
    pub fn add_point(&mut self, x: f32, y: f32) -> Option<u32> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let id = self.points.len() as u32;
        self.points.push(Some(Vec2 { x, y }));
        self.bump();
        Some(id)
    }

    pub fn move_point(&mut self, id: u32, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let old = match self.points.get(id as usize).and_then(|p| *p) {
            Some(p) => p,
            None => return false,
        };
        let dx = x - old.x;
        let dy = y - old.y;
        if (dx * dx + dy * dy) <= EPS_POS * EPS_POS {
            return true;
        }
        if let Some(Some(p)) = self.points.get_mut(id as usize) {
            p.x = x;
            p.y = y;
        } else {
            return false;
        }
        self.bump();
        true
    }

    pub fn get_point(&self, id: u32) -> Option<(f32, f32)> {
        self.points
            .get(id as usize)
            .and_then(|p| *p)
            .map(|p| (p.x, p.y))
    }

    pub fn remove_point(&mut self, id: u32) -> bool {
        if self.points.get(id as usize).and_then(|p| *p).is_none() {
            return false;
        }
        if let Some(slot) = self.points.get_mut(id as usize) {
            *slot = None;
        }
        for slot in self.walls.iter_mut() {
            if let Some(w) = slot {
                if w.a == id || w.b == id {
                    *slot = None;
                }
            }
        }
        self.bump();
        true
    }

    pub fn point_count(&self) -> u32 {
        self.points.iter().filter(|p| p.is_some()).count() as u32
    }

    // --- walls ------------------------------------------------------------

    pub fn add_wall(&mut self, a: u32, b: u32, color: WallColor) -> Option<u32> {
        if a == b {
            return None;
        }
        if self.points.get(a as usize).and_then(|p| *p).is_none() {
            return None;
        }
        if self.points.get(b as usize).and_then(|p| *p).is_none() {
            return None;
        }
        // One wall per point pair: duplicates would only create digons.
        for w in self.walls.iter().flatten() {
            if (w.a == a && w.b == b) || (w.a == b && w.b == a) {
                return None;
            }
        }
        let id = self.walls.len() as u32;
        self.walls.push(Some(Wall { a, b, color }));
        self.bump();
        Some(id)
    }

    pub fn remove_wall(&mut self, id: u32) -> bool {
        if let Some(slot) = self.walls.get_mut(id as usize) {
            if slot.is_some() {
                *slot = None;
                self.bump();
                return true;
            }
        }
        false
    }

    pub fn set_wall_color(&mut self, id: u32, color: WallColor) -> bool {
        if let Some(Some(w)) = self.walls.get_mut(id as usize) {
            if w.color != color {
                w.color = color;
                self.bump();
            }
            return true;
        }
        false
    }

    pub fn get_wall(&self, id: u32) -> Option<Wall> {
        self.walls.get(id as usize).and_then(|w| *w)
    }

    pub fn wall_count(&self) -> u32 {
        self.walls.iter().filter(|w| w.is_some()).count() as u32
    }

    // --- rooms ------------------------------------------------------------

    /// Recompute rooms if geometry changed since the last build, carrying
    /// the start/goal flags (and the player) across by remembered centroid.
    fn ensure_rooms(&mut self) {
        if self.rooms_ver == self.geom_ver {
            return;
        }
        // Refresh anchors from the rooms currently holding each flag, so a
        // drag tracks the deforming polygon rather than its original shape.
        let refreshed_start = self
            .start
            .and_then(|id| self.room(id))
            .map(|r| r.data().centroid);
        if refreshed_start.is_some() {
            self.start_anchor = refreshed_start;
        }
        let refreshed_goal = self
            .goal
            .and_then(|id| self.room(id))
            .map(|r| r.data().centroid);
        if refreshed_goal.is_some() {
            self.goal_anchor = refreshed_goal;
        }
        let player_anchor = self.player.and_then(|p| match p.room {
            RoomId::Outer => None,
            id => self.room(id).map(|r| r.data().centroid),
        });

        self.rooms = faces::extract_faces(&self.points, &self.walls);
        self.rooms_ver = self.geom_ver;

        self.start = self.start_anchor.and_then(|a| self.attach(a));
        self.goal = self.goal_anchor.and_then(|a| self.attach(a));
        if let Some(p) = self.player {
            let new_room = match p.room {
                RoomId::Outer => Some(RoomId::Outer),
                RoomId::Enclosed(_) => player_anchor.and_then(|a| self.attach(a)),
            };
            self.player = match new_room {
                Some(room) => Some(PlayerState {
                    room,
                    last_color: p.last_color,
                }),
                // Room dissolved under the player: back to the start.
                None => self.start.map(|room| PlayerState {
                    room,
                    last_color: None,
                }),
            };
        }
    }

    /// Resolve an anchor to an enclosed room: the room containing it, else
    /// the nearest enclosed room by centroid distance. `None` only when the
    /// board has no enclosed rooms.
    fn attach(&self, anchor: Vec2) -> Option<RoomId> {
        if let Some(RoomId::Enclosed(i)) = picking::room_at(&self.rooms, anchor.x, anchor.y) {
            return Some(RoomId::Enclosed(i));
        }
        let mut best: Option<(u32, f32)> = None;
        let mut enclosed = 0u32;
        for room in &self.rooms {
            if room.is_outer() {
                continue;
            }
            let id = enclosed;
            enclosed += 1;
            let c = room.data().centroid;
            let dx = c.x - anchor.x;
            let dy = c.y - anchor.y;
            let d2 = dx * dx + dy * dy;
            if best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((id, d2));
            }
        }
        best.map(|(id, _)| RoomId::Enclosed(id))
    }

    pub fn rooms(&mut self) -> &[Room] {
        self.ensure_rooms();
        &self.rooms
    }

    /// Look up a room by id. Enclosed ids index the room list directly; the
    /// outer room is always the last entry.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        match id {
            RoomId::Outer => self.rooms.last().filter(|r| r.is_outer()),
            RoomId::Enclosed(i) => self.rooms.get(i as usize).filter(|r| !r.is_outer()),
        }
    }

    pub fn room_at(&mut self, x: f32, y: f32) -> Option<RoomId> {
        self.ensure_rooms();
        picking::room_at(&self.rooms, x, y)
    }

    pub fn pick(&self, x: f32, y: f32, tol: f32) -> Option<Pick> {
        picking::pick_impl(&self.points, &self.walls, x, y, tol)
    }

    pub fn passages(&mut self) -> Vec<Passage> {
        self.ensure_rooms();
        solver::board_passages(&self.rooms, &self.walls)
    }

    // --- flags ------------------------------------------------------------

    /// Flag the enclosed room containing (x, y) as the start. Rejected for
    /// positions in the outer face.
    pub fn set_start_at(&mut self, x: f32, y: f32) -> bool {
        self.ensure_rooms();
        match picking::room_at(&self.rooms, x, y) {
            Some(RoomId::Enclosed(i)) => {
                self.start = Some(RoomId::Enclosed(i));
                self.start_anchor = self.room(RoomId::Enclosed(i)).map(|r| r.data().centroid);
                true
            }
            _ => false,
        }
    }

    pub fn set_goal_at(&mut self, x: f32, y: f32) -> bool {
        self.ensure_rooms();
        match picking::room_at(&self.rooms, x, y) {
            Some(RoomId::Enclosed(i)) => {
                self.goal = Some(RoomId::Enclosed(i));
                self.goal_anchor = self.room(RoomId::Enclosed(i)).map(|r| r.data().centroid);
                true
            }
            _ => false,
        }
    }

    pub fn clear_start(&mut self) {
        self.start = None;
        self.start_anchor = None;
    }

    pub fn clear_goal(&mut self) {
        self.goal = None;
        self.goal_anchor = None;
    }

    pub fn start_room(&mut self) -> Option<RoomId> {
        self.ensure_rooms();
        self.start
    }

    pub fn goal_room(&mut self) -> Option<RoomId> {
        self.ensure_rooms();
        self.goal
    }

    // --- game -------------------------------------------------------------

    /// Put the player in the start room with no color constraint.
    pub fn reset_player(&mut self) -> bool {
        self.ensure_rooms();
        match self.start {
            Some(room) => {
                self.player = Some(PlayerState {
                    room,
                    last_color: None,
                });
                true
            }
            None => false,
        }
    }

    pub fn player(&mut self) -> Option<PlayerState> {
        self.ensure_rooms();
        self.player
    }

    /// Attempt to move the player into `target`. The rooms must share a
    /// wall, the wall must not be black, and its color must differ from the
    /// previously traversed one.
    pub fn try_move(&mut self, target: RoomId) -> MoveOutcome {
        self.ensure_rooms();
        let Some(player) = self.player else {
            return MoveOutcome::NoStart;
        };
        if target == player.room || self.room(target).is_none() {
            return MoveOutcome::NotAdjacent;
        }
        let passages = solver::board_passages(&self.rooms, &self.walls);
        let mut saw_black = false;
        let mut saw_same = false;
        let mut chosen: Option<WallColor> = None;
        for p in &passages {
            let connects = (p.a == player.room && p.b == target)
                || (p.b == player.room && p.a == target);
            if !connects {
                continue;
            }
            if !p.color.passable() {
                saw_black = true;
                continue;
            }
            if player.last_color == Some(p.color) {
                saw_same = true;
                continue;
            }
            chosen = Some(p.color);
            break;
        }
        match chosen {
            Some(color) => {
                let won = self.goal == Some(target);
                self.player = Some(PlayerState {
                    room: target,
                    last_color: Some(color),
                });
                if won {
                    MoveOutcome::Won { color }
                } else {
                    MoveOutcome::Moved { color }
                }
            }
            None if saw_same => MoveOutcome::SameColor,
            None if saw_black => MoveOutcome::Blocked,
            None => MoveOutcome::NotAdjacent,
        }
    }

    /// Shortest alternating path from start to goal, as wall ids for
    /// highlighting. `None` covers missing flags and unreachable goals
    /// alike; the caller decides how to surface each.
    pub fn solve(&mut self) -> Option<Vec<u32>> {
        self.ensure_rooms();
        let start = self.start?;
        let goal = self.goal?;
        let passages = solver::board_passages(&self.rooms, &self.walls);
        solver::solve(&passages, start, goal)
    }

    pub fn is_solvable(&mut self) -> bool {
        self.solve().is_some()
    }

    /// Drop everything: geometry, flags, player.
    pub fn clear(&mut self) {
        self.points.clear();
        self.walls.clear();
        self.rooms.clear();
        self.start = None;
        self.goal = None;
        self.start_anchor = None;
        self.goal_anchor = None;
        self.player = None;
        self.bump();
    }

    // --- levels -----------------------------------------------------------

    pub fn to_level(&self) -> Level {
        let mut remap: HashMap<u32, u32> = HashMap::new();
        let mut points = Vec::new();
        for (i, p) in self.points.iter().enumerate() {
            if let Some(p) = p {
                remap.insert(i as u32, points.len() as u32);
                points.push(*p);
            }
        }
        let mut walls = Vec::new();
        for w in self.walls.iter().flatten() {
            if let (Some(&a), Some(&b)) = (remap.get(&w.a), remap.get(&w.b)) {
                walls.push(LevelWall {
                    a,
                    b,
                    color: w.color,
                });
            }
        }
        Level {
            points,
            walls,
            start: self.start_anchor,
            goal: self.goal_anchor,
        }
    }

    /// Replace the whole board with a level. Flags resolve from the level's
    /// anchors on the next room build; the player is cleared until
    /// `reset_player`.
    pub fn load_level(&mut self, level: &Level) {
        self.points = level.points.iter().map(|p| Some(*p)).collect();
        let n = level.points.len() as u32;
        self.walls = level
            .walls
            .iter()
            .filter(|w| w.a != w.b && w.a < n && w.b < n)
            .map(|w| {
                Some(Wall {
                    a: w.a,
                    b: w.b,
                    color: w.color,
                })
            })
            .collect();
        self.rooms.clear();
        self.start = None;
        self.goal = None;
        self.start_anchor = level.start;
        self.goal_anchor = level.goal;
        self.player = None;
        self.bump();
    }

    pub fn to_json(&self) -> String {
        self.to_level().to_json()
    }

    pub fn load_json(&mut self, s: &str) -> Result<(), serde_json::Error> {
        let level = Level::from_json(s)?;
        self.load_level(&level);
        Ok(())
    }

    /// Generate and load a solvable grid level.
    pub fn generate_grid<R: Rng + ?Sized>(
        &mut self,
        cols: usize,
        rows: usize,
        cell: f32,
        rng: &mut R,
    ) {
        let level = generator::grid_level(cols, rows, cell, rng);
        self.load_level(&level);
    }

    // --- render getters ---------------------------------------------------

    pub fn get_point_arrays(&self) -> (Vec<u32>, Vec<f32>) {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for (i, p) in self.points.iter().enumerate() {
            if let Some(p) = p {
                ids.push(i as u32);
                pos.push(p.x);
                pos.push(p.y);
            }
        }
        (ids, pos)
    }

    pub fn get_wall_arrays(&self) -> WallArrays {
        let mut ids = Vec::new();
        let mut endpoints = Vec::new();
        let mut colors = Vec::new();
        for (i, w) in self.walls.iter().enumerate() {
            if let Some(w) = w {
                ids.push(i as u32);
                endpoints.push(w.a);
                endpoints.push(w.b);
                colors.push(color_to_u8(w.color));
            }
        }
        WallArrays {
            ids,
            endpoints,
            colors,
        }
    }

    /// Room metadata for label placement and region rendering. Enclosed
    /// rooms use their index as id; the outer room reports -1.
    pub fn rooms_json(&mut self) -> Vec<serde_json::Value> {
        #[derive(Serialize)]
        struct RoomSer {
            id: i32,
            outer: bool,
            start: bool,
            goal: bool,
            area: f32,
            centroid: [f32; 2],
            points: Vec<f32>,
        }

        self.ensure_rooms();
        let start = self.start;
        let goal = self.goal;
        let mut out = Vec::with_capacity(self.rooms.len());
        let mut enclosed = 0u32;
        for room in &self.rooms {
            let id = if room.is_outer() {
                RoomId::Outer
            } else {
                let id = RoomId::Enclosed(enclosed);
                enclosed += 1;
                id
            };
            let data = room.data();
            let mut pts = Vec::with_capacity(data.polygon.len() * 2);
            for p in &data.polygon {
                pts.push(p.x);
                pts.push(p.y);
            }
            out.push(
                serde_json::to_value(RoomSer {
                    id: match id {
                        RoomId::Outer => -1,
                        RoomId::Enclosed(i) => i as i32,
                    },
                    outer: room.is_outer(),
                    start: start == Some(id),
                    goal: goal == Some(id),
                    area: data.area,
                    centroid: [data.centroid.x, data.centroid.y],
                    points: pts,
                })
                .unwrap(),
            );
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
