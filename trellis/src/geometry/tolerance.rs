// Centralized tolerances for robust geometry

pub const EPS_POS: f32 = 1e-4; // point coincidence threshold (px)
pub const EPS_FACE_AREA: f32 = 1e-2; // tiny face area threshold (px^2)
