use super::{MIN_BRIGHTNESS, MIN_OPACITY};
use crate::config::ThemeConfig;
use palette::{LinSrgba, Mix, Srgba};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub front: Srgba<f64>,
    pub back: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl ThemeColors {
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let [r, g, b, a] = cfg.front;
        let front = Srgba::new(r, g, b, a);
        let [r, g, b, a] = cfg.back;
        let back = Srgba::new(r, g, b, a);
        Self { front, back }
    }
}

/// How the renderer should dim an item for its depth on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shade {
    pub opacity: f64,
    pub brightness: f64,
    /// sRGB components, `[r, g, b, a]`.
    pub tint: [f64; 4],
}

impl Shade {
    pub fn from_depth(depth_weight: f64, colors: &ThemeColors) -> Self {
        let w = if depth_weight.is_finite() {
            depth_weight.clamp(0.0, 1.0)
        } else {
            0.0
        };

        // mixed in linear light
        let back: LinSrgba<f64> = colors.back.into_linear();
        let front: LinSrgba<f64> = colors.front.into_linear();
        let tint: Srgba<f64> = Srgba::from_linear(back.mix(front, w));
        let (r, g, b, a) = tint.into_components();

        Self {
            opacity: MIN_OPACITY + (1.0 - MIN_OPACITY) * w,
            brightness: MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * w,
            tint: [r, g, b, a],
        }
    }
}
