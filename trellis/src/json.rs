use serde::{Deserialize, Serialize};

use crate::model::{Vec2, WallColor};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LevelWall {
    pub a: u32,
    pub b: u32,
    pub color: WallColor,
}

/// Authored/saved board contents. Point ids are implicit indices; start and
/// goal are board-space anchors resolved to rooms when the level is loaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    pub points: Vec<Vec2>,
    pub walls: Vec<LevelWall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec2>,
}

impl Level {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    pub fn from_json(s: &str) -> Result<Level, serde_json::Error> {
        serde_json::from_str(s)
    }
}
