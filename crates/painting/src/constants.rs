/// Hardness at or above which the clone mask is a plain disc.
pub const HARD_EDGE_THRESHOLD: f32 = 0.99;
