//! Simulation timing and feel constants

/// Longest step the simulation takes in one frame (seconds); slow frames are truncated
pub const MAX_FRAME_DT: f32 = 0.033;

/// How far below the world bottom the player may fall before respawning
pub const FALL_OUT_MARGIN: f32 = 120.0;

/// Seconds per walk-cycle frame
pub const WALK_FRAME_TIME: f32 = 0.12;

/// Seconds per coin spin frame
pub const COIN_FRAME_TIME: f32 = 0.15;

/// Frames in every sprite cycle
pub const CYCLE_FRAMES: usize = 2;

/// Idle bob phase speed (radians per second)
pub const IDLE_PULSE_RATE: f32 = 6.0;

/// Idle bob height in world pixels
pub const IDLE_BOB_AMPLITUDE: f32 = 1.5;

/// Horizontal speed below which the player counts as standing still for the idle bob
pub const IDLE_SPEED_EPSILON: f32 = 1.0;

/// Where the player sits inside the camera view, as a fraction of view size
pub const CAMERA_ANCHOR_X: f32 = 0.45;
pub const CAMERA_ANCHOR_Y: f32 = 0.55;
