use ratatui::style::Color;

// The simulation runs on a fixed playfield, upscaled to the page canvas at
// draw time. Units below are playfield units, y grows downward.
pub const PLAYFIELD_W: f32 = 100.0;
pub const PLAYFIELD_H: f32 = 140.0;

// Gravity is added to the vertical velocity once per update call, NOT scaled
// by dt; only position integration is dt-scaled.
pub const GRAVITY: f32 = 3.0;
pub const JUMP_FORCE: f32 = 100.0;
pub const JUMP_COOLDOWN: f32 = 0.25;
pub const VELOCITY_LIMIT: f32 = 200.0;

pub const BIRD_W: f32 = 10.0;
pub const BIRD_H: f32 = 7.0;
pub const BIRD_START_CX: f32 = 15.0;
pub const BIRD_START_CY: f32 = PLAYFIELD_H / 2.0 - 5.0;

// The bird dies once its rect is this far beyond the playfield edge.
pub const OUT_OF_BOUNDS_MARGIN: f32 = 20.0;

pub const PIPE_SPEED: f32 = 60.0;
pub const PIPE_W: f32 = 10.0;
pub const PIPE_H: f32 = PLAYFIELD_H / 2.0;
// Full gap size; half of a draw from this range separates each pipe from the
// playfield center line.
pub const PIPE_GAP_RANGE: [f32; 2] = [80.0, 90.0];
pub const PIPE_OFFSET_RANGE: [f32; 2] = [-30.0, 30.0];
// Pipes respawn slightly off the right edge.
pub const PIPE_RESPAWN_X: f32 = PLAYFIELD_W + 10.0;

pub const BACKGROUND_SPEED: f32 = 40.0;

// How long a frame is allowed to be; protects against a huge first dt after
// page switches or suspend/resume.
pub const MAX_FRAME_DT: f32 = 0.25;

pub const PIPE_COLOR: Color = Color::LightGreen;
pub const BIRD_COLOR: Color = Color::Yellow;
pub const SCORE_COLOR: Color = Color::White;
pub const HINT_COLOR: Color = Color::Gray;

pub const BIRD_RISING: &str = r#"
 __
( o)>
 \ \_
"#;
pub const BIRD_FALLING: &str = r#"
  __
 / /
( o)>
"#;

pub const START_HINT: &str = "press SPACE or click to flap";
