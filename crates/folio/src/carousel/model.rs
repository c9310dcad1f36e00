use super::placement::{self, ItemPlacement};
use super::{
    DRAG_VELOCITY_GAIN, FRICTION, RELEASE_DAMPING, SAMPLE_CAPACITY, SENSITIVITY, VELOCITY_FLOOR,
    WHEEL_INERTIA_GAIN, WHEEL_SENSITIVITY, WIDE_RADIUS,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Physics constants for the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    pub sensitivity: f64,
    pub drag_velocity_gain: f64,
    pub release_damping: f64,
    pub wheel_sensitivity: f64,
    pub wheel_inertia_gain: f64,
    pub friction: f64,
    pub velocity_floor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sensitivity: SENSITIVITY,
            drag_velocity_gain: DRAG_VELOCITY_GAIN,
            release_damping: RELEASE_DAMPING,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            wheel_inertia_gain: WHEEL_INERTIA_GAIN,
            friction: FRICTION,
            velocity_floor: VELOCITY_FLOOR,
        }
    }
}

impl Tuning {
    /// Replaces non-finite values with defaults and clamps the ones whose
    /// range matters for decay: damping to `[0, 1]`, friction to `[0, 1)`,
    /// a non-negative floor.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            sensitivity: pick(self.sensitivity, d.sensitivity),
            drag_velocity_gain: pick(self.drag_velocity_gain, d.drag_velocity_gain),
            release_damping: pick(self.release_damping, d.release_damping).clamp(0.0, 1.0),
            wheel_sensitivity: pick(self.wheel_sensitivity, d.wheel_sensitivity),
            wheel_inertia_gain: pick(self.wheel_inertia_gain, d.wheel_inertia_gain),
            friction: pick(self.friction, d.friction).clamp(0.0, 1.0 - f64::EPSILON),
            velocity_floor: pick(self.velocity_floor, d.velocity_floor).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RotationState {
    /// Degrees, unbounded. Wraps only when rendered.
    pub angle: f64,
    /// Degrees per tick.
    pub velocity: f64,
    pub is_dragging: bool,
}

/// Fixed-capacity FIFO of instantaneous drag velocities.
#[derive(Debug, Clone)]
pub struct VelocitySamples {
    buf: VecDeque<f64>,
}

impl Default for VelocitySamples {
    fn default() -> Self {
        Self {
            buf: VecDeque::with_capacity(SAMPLE_CAPACITY),
        }
    }
}

impl VelocitySamples {
    pub fn push(&mut self, v: f64) {
        if self.buf.len() == SAMPLE_CAPACITY {
            self.buf.pop_front();
        }
        self.buf.push_back(v);
    }

    pub fn mean(&self) -> f64 {
        if self.buf.is_empty() {
            return 0.0;
        }
        self.buf.iter().sum::<f64>() / self.buf.len() as f64
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.buf.iter()
    }
}

/// One pointer gesture, from drag start to drag end.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub start_pointer_y: f64,
    pub start_angle: f64,
    pub last_pointer_y: f64,
    /// Unknown until the first move.
    pub last_timestamp: Option<f64>,
    pub samples: VelocitySamples,
}

impl DragSession {
    fn begin(pointer_y: f64, angle: f64) -> Self {
        Self {
            start_pointer_y: pointer_y,
            start_angle: angle,
            last_pointer_y: pointer_y,
            last_timestamp: None,
            samples: VelocitySamples::default(),
        }
    }

    fn record(&mut self, pointer_y: f64, timestamp_ms: f64, gain: f64) {
        if !timestamp_ms.is_finite() {
            return;
        }
        if let Some(last) = self.last_timestamp {
            let elapsed = timestamp_ms - last;
            if elapsed > 0.0 {
                // pointer down turns the wheel back, hence the sign flip
                let v = -(pointer_y - self.last_pointer_y) / elapsed * gain;
                if v.is_finite() {
                    self.samples.push(v);
                }
            }
        }
        self.last_pointer_y = pointer_y;
        self.last_timestamp = Some(timestamp_ms);
    }
}

/// Turns pointer and wheel input into a momentum-carrying wheel angle.
///
/// The host calls the `on_*` handlers from its input callbacks and [`tick`]
/// once per animation frame; everything runs on one thread, one call at a
/// time. Momentum decays by a fixed factor per tick, so the apparent decay
/// rate follows the host's frame rate.
///
/// [`tick`]: RotationController::tick
#[derive(Debug, Clone)]
pub struct RotationController {
    state: RotationState,
    drag: Option<DragSession>,
    tuning: Tuning,
    radius: f64,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(Tuning::default(), WIDE_RADIUS)
    }
}

impl RotationController {
    pub fn new(tuning: Tuning, radius: f64) -> Self {
        let mut controller = Self {
            state: RotationState::default(),
            drag: None,
            tuning: tuning.sanitized(),
            radius: WIDE_RADIUS,
        };
        controller.set_radius(radius);
        controller
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.sanitized();
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ignores non-finite or non-positive radii.
    pub fn set_radius(&mut self, radius: f64) {
        if radius.is_finite() && radius > 0.0 {
            self.radius = radius;
        }
    }

    pub fn on_drag_start(&mut self, pointer_y: f64) {
        let pointer_y = finite_or_zero(pointer_y);
        self.drag = Some(DragSession::begin(pointer_y, self.state.angle));
        self.state.velocity = 0.0;
        self.state.is_dragging = true;
    }

    pub fn on_drag_move(&mut self, pointer_y: f64, timestamp_ms: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let pointer_y = finite_or_zero(pointer_y);
        let delta_y = pointer_y - drag.start_pointer_y;
        self.state.angle = drag.start_angle - delta_y * self.tuning.sensitivity;
        drag.record(pointer_y, timestamp_ms, self.tuning.drag_velocity_gain);
    }

    pub fn on_drag_end(&mut self) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        self.state.is_dragging = false;
        self.state.velocity = finite_or_zero(drag.samples.mean() * self.tuning.release_damping);
        drag.samples.clear();
    }

    /// Immediate nudge plus injected momentum. Applies during a drag too.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let step = finite_or_zero(delta_y) * self.tuning.wheel_sensitivity;
        self.state.angle += step;
        self.state.velocity = step * self.tuning.wheel_inertia_gain;
    }

    /// Advances momentum by one frame. Returns whether the angle moved.
    pub fn tick(&mut self) -> bool {
        if self.state.is_dragging {
            return false;
        }

        let floor = self.tuning.velocity_floor;
        let mut velocity = finite_or_zero(self.state.velocity);
        let moved = velocity.abs() > floor;
        if moved {
            self.state.angle += velocity;
            velocity *= self.tuning.friction;
        }
        if velocity.abs() <= floor {
            velocity = 0.0;
        }
        self.state.velocity = velocity;
        moved
    }

    pub fn placement(&self, index: usize, total: usize) -> Option<ItemPlacement> {
        placement::place(index, total, self.state.angle, self.radius)
    }

    pub fn layout(&self, total: usize) -> Vec<ItemPlacement> {
        (0..total).filter_map(|i| self.placement(i, total)).collect()
    }

    /// Item indices back to front, for painter's-order stacking.
    pub fn draw_order(&self, total: usize) -> Vec<usize> {
        let mut placements = self.layout(total);
        placements.sort_by(|a, b| a.depth_weight.total_cmp(&b.depth_weight));
        placements.into_iter().map(|p| p.index).collect()
    }
}
