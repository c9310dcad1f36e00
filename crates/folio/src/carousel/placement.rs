use super::FULL_TURN;
use serde::{Deserialize, Serialize};

pub fn angle_step(total: usize) -> Option<f64> {
    (total > 0).then(|| FULL_TURN / total as f64)
}

pub fn item_angle(index: usize, total: usize) -> Option<f64> {
    angle_step(total).map(|step| index as f64 * step)
}

/// 1.0 when the item faces the viewer, 0.0 when it sits directly opposite.
pub fn depth_weight(item_angle: f64, angle: f64) -> f64 {
    let w = ((item_angle + angle).to_radians().cos() + 1.0) / 2.0;
    if w.is_finite() { w.clamp(0.0, 1.0) } else { 0.0 }
}

/// Placement of one item on the wheel, applied in order: rotate to the
/// item's position, push out by the radius, rotate back so it stays upright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub wheel_deg: f64,
    pub radius: f64,
    pub counter_deg: f64,
}

impl Transform {
    pub fn new(wheel_deg: f64, radius: f64) -> Self {
        Self {
            wheel_deg,
            radius,
            counter_deg: -wheel_deg,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rotateX({:.3}deg) translateZ({:.1}px) rotateX({:.3}deg)",
            self.wheel_deg, self.radius, self.counter_deg
        )
    }

    /// Item centre as `(y, z)` in screen space (y grows downward, z toward
    /// the viewer).
    pub fn offset(&self) -> (f64, f64) {
        let (sin, cos) = self.wheel_deg.to_radians().sin_cos();
        (-self.radius * sin, self.radius * cos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub index: usize,
    pub item_angle: f64,
    pub depth_weight: f64,
    pub transform: Transform,
}

/// `None` when there is nothing to place (`total == 0`) or `index` is out of range.
pub fn place(index: usize, total: usize, angle: f64, radius: f64) -> Option<ItemPlacement> {
    if index >= total {
        return None;
    }
    let item_angle = item_angle(index, total)?;
    Some(ItemPlacement {
        index,
        item_angle,
        depth_weight: depth_weight(item_angle, angle),
        transform: Transform::new(item_angle + angle, radius),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_angle_steps_cover_full_turn() {
        for total in 1..=64 {
            let step = angle_step(total).unwrap();
            assert!((step * total as f64 - FULL_TURN).abs() < EPS, "n={}", total);

            let sum: f64 = (0..total).map(|_| step).sum();
            assert!((sum - FULL_TURN).abs() < EPS, "n={}", total);

            let angles: Vec<f64> = (0..total).map(|i| item_angle(i, total).unwrap()).collect();
            for (i, a) in angles.iter().enumerate() {
                assert!((0.0..FULL_TURN).contains(a));
                assert!((a - i as f64 * step).abs() < EPS);
            }
            for pair in angles.windows(2) {
                assert!(pair[1] > pair[0]);
            }
        }
    }

    #[test]
    fn test_zero_items_has_no_placement() {
        assert_eq!(angle_step(0), None);
        assert!(place(0, 0, 0.0, 400.0).is_none());
        assert!(place(3, 3, 0.0, 400.0).is_none());
    }

    #[test]
    fn test_depth_weight_bounds_and_extremes() {
        assert!((depth_weight(0.0, 0.0) - 1.0).abs() < EPS);
        assert!((depth_weight(90.0, -90.0) - 1.0).abs() < EPS);
        assert!((depth_weight(300.0, 420.0) - 1.0).abs() < EPS);
        assert!(depth_weight(180.0, 0.0).abs() < EPS);
        assert!(depth_weight(0.0, -540.0).abs() < EPS);
        assert!((depth_weight(90.0, 0.0) - 0.5).abs() < EPS);

        let mut angle = -10_000.0;
        while angle < 10_000.0 {
            let w = depth_weight(45.0, angle);
            assert!((0.0..=1.0).contains(&w), "angle={}", angle);
            angle += 7.3;
        }

        assert_eq!(depth_weight(0.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_transform_counter_rotates() {
        let placed = place(1, 4, 30.0, 250.0).unwrap();

        assert_eq!(placed.item_angle, 90.0);
        assert_eq!(placed.transform.wheel_deg, 120.0);
        assert_eq!(placed.transform.counter_deg, -120.0);
        assert_eq!(placed.transform.radius, 250.0);
        assert_eq!(
            placed.transform.to_css(),
            "rotateX(120.000deg) translateZ(250.0px) rotateX(-120.000deg)"
        );
    }

    #[test]
    fn test_transform_offset() {
        let (y, z) = Transform::new(0.0, 400.0).offset();
        assert!(y.abs() < EPS && (z - 400.0).abs() < EPS);

        let (y, z) = Transform::new(90.0, 400.0).offset();
        assert!((y + 400.0).abs() < EPS && z.abs() < EPS);
    }
}
