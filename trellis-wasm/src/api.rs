use crate::Board;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trellis::RoomId;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn room_to_i32(id: RoomId) -> i32 {
    match id {
        RoomId::Outer => -1,
        RoomId::Enclosed(i) => i as i32,
    }
}

fn room_from_i32(v: i32) -> Option<RoomId> {
    match v {
        -1 => Some(RoomId::Outer),
        i if i >= 0 => Some(RoomId::Enclosed(i as u32)),
        _ => None,
    }
}

fn opt_room(id: Option<RoomId>) -> JsValue {
    match id {
        Some(id) => JsValue::from_f64(room_to_i32(id) as f64),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
impl Board {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Board {
        crate::Board::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Points/Walls basic
    pub fn add_point(&mut self, x: f32, y: f32) -> Option<u32> {
        self.inner.add_point(x, y)
    }
    pub fn add_point_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.add_point(x, y) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::non_finite("x"),
        }
    }
    pub fn move_point(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.move_point(id, x, y)
    }
    pub fn move_point_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if self.inner.get_point(id).is_none() {
            return error::invalid_id("point", id);
        }
        let ok = self.inner.move_point(id, x, y);
        error::ok(JsValue::from_bool(ok))
    }
    pub fn get_point(&self, id: u32) -> JsValue {
        if let Some((x, y)) = self.inner.get_point(id) {
            serde_wasm_bindgen::to_value(&vec![x, y]).unwrap()
        } else {
            JsValue::NULL
        }
    }
    pub fn get_point_res(&self, id: u32) -> JsValue {
        if let Some((x, y)) = self.inner.get_point(id) {
            error::ok(serde_wasm_bindgen::to_value(&vec![x, y]).unwrap())
        } else {
            error::invalid_id("point", id)
        }
    }
    pub fn remove_point(&mut self, id: u32) -> bool {
        self.inner.remove_point(id)
    }
    pub fn remove_point_res(&mut self, id: u32) -> JsValue {
        if self.inner.get_point(id).is_none() {
            return error::invalid_id("point", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_point(id)))
    }
    pub fn point_count(&self) -> u32 {
        self.inner.point_count()
    }
    pub fn add_wall(&mut self, a: u32, b: u32, color: u8) -> Option<u32> {
        let color = trellis::color_from_u8(color)?;
        self.inner.add_wall(a, b, color)
    }
    pub fn add_wall_res(&mut self, a: u32, b: u32, color: u8) -> JsValue {
        if self.inner.get_point(a).is_none() {
            return error::invalid_id("point", a);
        }
        if self.inner.get_point(b).is_none() {
            return error::invalid_id("point", b);
        }
        if a == b {
            return error::err(
                "invalid_wall",
                "wall endpoints cannot be the same point",
                None,
            );
        }
        let Some(color) = trellis::color_from_u8(color) else {
            return error::invalid_color(color);
        };
        match self.inner.add_wall(a, b, color) {
            Some(wid) => error::ok(JsValue::from_f64(wid as f64)),
            None => error::err("invalid_wall", "failed to add wall", None),
        }
    }
    pub fn remove_wall(&mut self, id: u32) -> bool {
        self.inner.remove_wall(id)
    }
    pub fn remove_wall_res(&mut self, id: u32) -> JsValue {
        if self.inner.get_wall(id).is_none() {
            return error::invalid_id("wall", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_wall(id)))
    }
    pub fn set_wall_color(&mut self, id: u32, color: u8) -> bool {
        match trellis::color_from_u8(color) {
            Some(color) => self.inner.set_wall_color(id, color),
            None => false,
        }
    }
    pub fn set_wall_color_res(&mut self, id: u32, color: u8) -> JsValue {
        if self.inner.get_wall(id).is_none() {
            return error::invalid_id("wall", id);
        }
        let Some(color) = trellis::color_from_u8(color) else {
            return error::invalid_color(color);
        };
        error::ok(JsValue::from_bool(self.inner.set_wall_color(id, color)))
    }
    pub fn wall_count(&self) -> u32 {
        self.inner.wall_count()
    }

    // Typed arrays getters
    pub fn get_point_data(&self) -> JsValue {
        let (ids, pos) = self.inner.get_point_arrays();
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "ids", &crate::interop::arr_u32(&ids).into());
        crate::interop::set_kv(&obj, "positions", &crate::interop::arr_f32(&pos).into());
        obj.into()
    }
    pub fn get_wall_data(&self) -> JsValue {
        let wa = self.inner.get_wall_arrays();
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "ids", &crate::interop::arr_u32(&wa.ids).into());
        crate::interop::set_kv(
            &obj,
            "endpoints",
            &crate::interop::arr_u32(&wa.endpoints).into(),
        );
        crate::interop::set_kv(&obj, "colors", &crate::interop::arr_u8(&wa.colors).into());
        obj.into()
    }

    // Picking
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if let Some(p) = self.inner.pick(x, y, tol) {
            // Flatten to { kind: 'point'|'wall', ... }
            let obj = crate::interop::new_obj();
            match p {
                trellis::Pick::Point { id, dist } => {
                    crate::interop::set_kv(&obj, "kind", &JsValue::from_str("point"));
                    crate::interop::set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    crate::interop::set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
                trellis::Pick::Wall { id, t, dist } => {
                    crate::interop::set_kv(&obj, "kind", &JsValue::from_str("wall"));
                    crate::interop::set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    crate::interop::set_kv(&obj, "t", &JsValue::from_f64(t as f64));
                    crate::interop::set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
            }
            obj.into()
        } else {
            JsValue::NULL
        }
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f32::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }

    // Rooms
    pub fn get_rooms(&mut self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.rooms_json()).unwrap()
    }
    pub fn get_rooms_res(&mut self) -> JsValue {
        error::ok(self.get_rooms())
    }
    pub fn room_at(&mut self, x: f32, y: f32) -> JsValue {
        opt_room(self.inner.room_at(x, y))
    }
    pub fn room_at_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::ok(self.room_at(x, y))
    }

    // Flags
    pub fn set_start_at(&mut self, x: f32, y: f32) -> bool {
        self.inner.set_start_at(x, y)
    }
    pub fn set_start_at_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !self.inner.set_start_at(x, y) {
            return error::err("outside_rooms", "position is not inside an enclosed room", None);
        }
        error::ok(self.start_room())
    }
    pub fn set_goal_at(&mut self, x: f32, y: f32) -> bool {
        self.inner.set_goal_at(x, y)
    }
    pub fn set_goal_at_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !self.inner.set_goal_at(x, y) {
            return error::err("outside_rooms", "position is not inside an enclosed room", None);
        }
        error::ok(self.goal_room())
    }
    pub fn clear_start(&mut self) {
        self.inner.clear_start();
    }
    pub fn clear_goal(&mut self) {
        self.inner.clear_goal();
    }
    pub fn start_room(&mut self) -> JsValue {
        opt_room(self.inner.start_room())
    }
    pub fn goal_room(&mut self) -> JsValue {
        opt_room(self.inner.goal_room())
    }

    // Game
    pub fn reset_player(&mut self) -> bool {
        self.inner.reset_player()
    }
    pub fn reset_player_res(&mut self) -> JsValue {
        if !self.inner.reset_player() {
            return error::err("no_start", "no start room is set", None);
        }
        error::ok(self.player())
    }
    pub fn player(&mut self) -> JsValue {
        match self.inner.player() {
            Some(p) => {
                let obj = crate::interop::new_obj();
                crate::interop::set_kv(
                    &obj,
                    "room",
                    &JsValue::from_f64(room_to_i32(p.room) as f64),
                );
                let last = match p.last_color {
                    Some(c) => JsValue::from_f64(trellis::color_to_u8(c) as f64),
                    None => JsValue::NULL,
                };
                crate::interop::set_kv(&obj, "last_color", &last);
                obj.into()
            }
            None => JsValue::NULL,
        }
    }
    /// The only wall color the next move may use, or null when any
    /// non-black color is allowed (or no player is active).
    pub fn required_color(&mut self) -> JsValue {
        match self.inner.player().and_then(|p| p.last_color) {
            Some(c) => match c.opposite() {
                Some(req) => JsValue::from_f64(trellis::color_to_u8(req) as f64),
                None => JsValue::NULL,
            },
            None => JsValue::NULL,
        }
    }
    pub fn try_move(&mut self, room: i32) -> JsValue {
        let outcome = match room_from_i32(room) {
            Some(target) => self.inner.try_move(target),
            None => trellis::MoveOutcome::NotAdjacent,
        };
        serde_wasm_bindgen::to_value(&outcome).unwrap()
    }
    pub fn try_move_res(&mut self, room: i32) -> JsValue {
        if room_from_i32(room).is_none() {
            return error::invalid_room(room);
        }
        error::ok(self.try_move(room))
    }

    // Solver
    pub fn solve(&mut self) -> JsValue {
        match self.inner.solve() {
            Some(path) => crate::interop::arr_u32(&path).into(),
            None => JsValue::NULL,
        }
    }
    pub fn solve_res(&mut self) -> JsValue {
        if self.inner.start_room().is_none() {
            return error::err("no_start", "no start room is set", None);
        }
        if self.inner.goal_room().is_none() {
            return error::err("no_goal", "no goal room is set", None);
        }
        match self.inner.solve() {
            Some(path) => error::ok(crate::interop::arr_u32(&path).into()),
            None => error::err("unreachable", "goal cannot be reached from start", None),
        }
    }
    pub fn is_solvable(&mut self) -> bool {
        self.inner.is_solvable()
    }

    // Levels + JSON
    pub fn to_json(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.to_level()).unwrap()
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<trellis::Level>(v) {
            Ok(level) => {
                self.inner.load_level(&level);
                true
            }
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<trellis::Level>(v) {
            Ok(level) => {
                self.inner.load_level(&level);
                error::ok(JsValue::from_bool(true))
            }
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
    pub fn generate_level(&mut self, cols: u32, rows: u32, cell: f32, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.inner
            .generate_grid(cols as usize, rows as usize, cell, &mut rng);
    }
    pub fn generate_level_res(&mut self, cols: u32, rows: u32, cell: f32, seed: u64) -> JsValue {
        if cols == 0 {
            return error::out_of_range("cols", 1.0, f32::INFINITY, cols as f32);
        }
        if rows == 0 {
            return error::out_of_range("rows", 1.0, f32::INFINITY, rows as f32);
        }
        if !cell.is_finite() || cell <= 0.0 {
            return error::out_of_range("cell", f32::MIN_POSITIVE, f32::INFINITY, cell);
        }
        self.generate_level(cols, rows, cell, seed);
        error::ok(JsValue::from_bool(self.inner.is_solvable()))
    }
}
