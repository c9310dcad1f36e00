pub mod model;
pub mod placement;
pub mod shade;
pub mod viewport;

pub use model::{DragSession, RotationController, RotationState, Tuning, VelocitySamples};
pub use placement::{ItemPlacement, Transform};
pub use shade::{Shade, ThemeColors};
pub use viewport::ViewportTier;

pub const FULL_TURN: f64 = 360.0;

pub const SENSITIVITY: f64 = 0.5; // degrees per px of drag
pub const DRAG_VELOCITY_GAIN: f64 = 8.0; // px/ms -> degrees/tick at ~16ms frames
pub const RELEASE_DAMPING: f64 = 0.8;
pub const WHEEL_SENSITIVITY: f64 = 0.1; // degrees per wheel delta unit
pub const WHEEL_INERTIA_GAIN: f64 = 0.2;
pub const FRICTION: f64 = 0.96; // per tick, not per second
pub const VELOCITY_FLOOR: f64 = 0.05;
pub const SAMPLE_CAPACITY: usize = 5;

// Wheel radius tiers
pub const NARROW_BREAKPOINT: f64 = 768.0;
pub const NARROW_RADIUS: f64 = 250.0;
pub const WIDE_RADIUS: f64 = 400.0;

// Depth shading floor for items facing away
pub const MIN_OPACITY: f64 = 0.25;
pub const MIN_BRIGHTNESS: f64 = 0.4;
