use serde::{Deserialize, Serialize};

/// Screen-space bounds of a clicked item, carried through for the opening
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    DragStart(f64),
    DragMove { y: f64, timestamp_ms: f64 },
    DragEnd,
    Wheel(f64),
    Tick,
    Resize(f64),
    Select { index: usize, origin: Rect },
    CloseModal,
    ContentReload,
    ConfigReload,
}
