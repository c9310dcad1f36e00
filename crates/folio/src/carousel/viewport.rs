use crate::config::ViewportConfig;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ViewportTier {
    #[strum(serialize = "narrow", serialize = "n", serialize = "mobile")]
    Narrow,
    #[strum(serialize = "wide", serialize = "w", serialize = "desktop")]
    Wide,
}

impl ViewportTier {
    /// Widths below `breakpoint` are narrow. Unknown widths count as wide.
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width.is_finite() && width < breakpoint {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    pub fn resolve(width: f64, cfg: &ViewportConfig) -> Self {
        cfg.tier
            .unwrap_or_else(|| Self::from_width(width, cfg.breakpoint))
    }

    pub fn radius(self, cfg: &ViewportConfig) -> f64 {
        match self {
            Self::Narrow => cfg.narrow_radius,
            Self::Wide => cfg.wide_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{NARROW_RADIUS, WIDE_RADIUS};
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_from_width() {
        assert_eq!(ViewportTier::from_width(375.0, 768.0), ViewportTier::Narrow);
        assert_eq!(ViewportTier::from_width(767.9, 768.0), ViewportTier::Narrow);
        assert_eq!(ViewportTier::from_width(768.0, 768.0), ViewportTier::Wide);
        assert_eq!(ViewportTier::from_width(2560.0, 768.0), ViewportTier::Wide);
        assert_eq!(ViewportTier::from_width(f64::NAN, 768.0), ViewportTier::Wide);
    }

    #[test]
    fn test_radius_per_tier() {
        let cfg = ViewportConfig::default();
        assert_eq!(ViewportTier::Narrow.radius(&cfg), NARROW_RADIUS);
        assert_eq!(ViewportTier::Wide.radius(&cfg), WIDE_RADIUS);
        assert!(ViewportTier::iter().all(|t| t.radius(&cfg) > 0.0));
    }

    #[test]
    fn test_forced_tier_wins() {
        let cfg = ViewportConfig {
            tier: Some(ViewportTier::Narrow),
            ..ViewportConfig::default()
        };
        assert_eq!(ViewportTier::resolve(1920.0, &cfg), ViewportTier::Narrow);
        assert_eq!(
            ViewportTier::resolve(1920.0, &ViewportConfig::default()),
            ViewportTier::Wide
        );
    }

    #[test]
    fn test_tier_deserialization() {
        let cases = vec![
            ("\"narrow\"", ViewportTier::Narrow),
            ("\"Narrow\"", ViewportTier::Narrow),
            ("\"MOBILE\"", ViewportTier::Narrow),
            ("\"n\"", ViewportTier::Narrow),
            ("\"wide\"", ViewportTier::Wide),
            ("\"Desktop\"", ViewportTier::Wide),
        ];

        for (json, expected) in cases {
            let deserialized: ViewportTier = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(serde_json::to_string(&ViewportTier::Wide).unwrap(), "\"wide\"");
    }
}
