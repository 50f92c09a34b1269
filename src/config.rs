// All tunable simulation constants in one place.

// Arena
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 800.0;
pub const PANEL_WIDTH: f32 = 200.0;

// Population
pub const INITIAL_TREE_COUNT: usize = 50;
pub const INITIAL_RADIUS: f32 = 1.0;

// Stepping
pub const SECONDS_PER_STEP: f32 = 0.01;
pub const DEFAULT_SEED: u64 = 42;

// Geometry
pub const INTERSECT_EPSILON: f32 = 1e-6;

// Offspring spawn distance, as multiples of the parent's radius.
pub const SPAWN_DIST_MIN: f32 = 3.0;
pub const SPAWN_DIST_MAX: f32 = 4.0;

// Quadtree
pub const NODE_CAPACITY: usize = 8;
pub const MAX_DEPTH: usize = 8;

// Stats
pub const STATS_CAPACITY: usize = 1000;
