use glam::Vec3;

// Shared audio/visual tuning constants used by the engine and the web frontend.

// Bus ceilings
pub const DOUBLE_BUS_MAX_GAIN: f32 = 0.20;
pub const PREMIERE_BUS_MAX_GAIN: f32 = 0.40;

// Spatializer directivity (degrees) and distance rolloff
pub const CONE_INNER_ANGLE: f32 = 30.0;
pub const CONE_OUTER_ANGLE: f32 = 60.0;
pub const CONE_OUTER_GAIN: f32 = 0.3;
pub const REF_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 40.0;
pub const ROLLOFF_FACTOR: f32 = 3.0;

// Listener frame (never rotated)
pub const LISTENER_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
pub const LISTENER_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// Below this distance a source is considered to sit on the listener
pub const ORIENTATION_EPSILON: f32 = 1e-6;

// Projection views
pub const VIEW_SCALE: f32 = 50.0; // screen pixels per world unit
pub const HIT_RADIUS_PX: f32 = 10.0;

// Markers
pub const LISTENER_MARKER_RADIUS: f32 = 10.0;
pub const SOURCE_MARKER_BASE_RADIUS: f32 = 5.0;
pub const SOURCE_MARKER_GAIN_RADIUS: f32 = 5.0; // extra radius at full gain
pub const LABEL_OFFSET_PX: f32 = 15.0;
pub const LABEL_LINE_HEIGHT_PX: f32 = 10.0;

// Gain ramps
pub const RAMP_STEPS_PER_SEC: f32 = 60.0;
pub const DEFAULT_RAMP_MS: f32 = 1000.0;
pub const PRESET_SCALE: f32 = 100.0; // presets are expressed on a 0..100 scale

// Number of presets reachable from the digit keys
pub const PRESET_HOTKEYS: usize = 6;
