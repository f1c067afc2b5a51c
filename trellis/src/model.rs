use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallColor {
    Red,
    Blue,
    Black,
}

impl WallColor {
    /// Black walls gate nothing; they are never traversable.
    pub fn passable(self) -> bool {
        !matches!(self, WallColor::Black)
    }

    /// The color the next traversed wall must have, if any.
    pub fn opposite(self) -> Option<WallColor> {
        match self {
            WallColor::Red => Some(WallColor::Blue),
            WallColor::Blue => Some(WallColor::Red),
            WallColor::Black => None,
        }
    }
}

/// Undirected colored segment between two points. Endpoint order carries no
/// meaning.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Wall {
    pub a: u32,
    pub b: u32,
    pub color: WallColor,
}

/// Identity of a room across lookups. Enclosed indices are only valid until
/// the next recomputation; `Outer` is the fixed id of the singleton unbounded
/// face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomId {
    Outer,
    Enclosed(u32),
}

/// Geometry of one traced face.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceData {
    /// Point ids along the boundary walk.
    pub boundary: Vec<u32>,
    /// Boundary coordinates in walk order.
    pub polygon: Vec<Vec2>,
    /// Shoelace area; sign indicates winding.
    pub area: f32,
    /// Arithmetic mean of the boundary points.
    pub centroid: Vec2,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Room {
    Outer(FaceData),
    Enclosed(FaceData),
}

impl Room {
    pub fn data(&self) -> &FaceData {
        match self {
            Room::Outer(d) | Room::Enclosed(d) => d,
        }
    }

    pub fn is_outer(&self) -> bool {
        matches!(self, Room::Outer(_))
    }
}

/// One crossing the player (or solver) may attempt: a wall shared by two
/// rooms. Black passages exist but are rejected at traversal time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub wall: u32,
    pub a: RoomId,
    pub b: RoomId,
    pub color: WallColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub room: RoomId,
    /// Color of the most recently traversed wall; `None` before the first
    /// move. Never `Black`.
    pub last_color: Option<WallColor>,
}

/// Result of a move attempt. All rejections are non-fatal; the board state is
/// untouched unless the move succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { color: WallColor },
    Won { color: WallColor },
    NotAdjacent,
    SameColor,
    Blocked,
    NoStart,
}
