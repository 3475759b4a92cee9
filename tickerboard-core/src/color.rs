//! Daily-change background color.

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Percent move at which the color saturates.
pub const SATURATION_PCT: f64 = 5.0;

/// Interpolate white toward red (falls) or green (gains).
///
/// The ratio is `|percent| / 5` clamped to 1; channels truncate toward zero.
/// Zero and negative moves take the red branch, so `color_for(0.0)` is white.
pub fn color_for(percent: f64) -> Rgb {
    let target = if percent > 0.0 { Rgb::GREEN } else { Rgb::RED };
    let ratio = if percent.is_finite() {
        (percent.abs() / SATURATION_PCT).min(1.0)
    } else {
        1.0
    };
    lerp(Rgb::WHITE, target, ratio)
}

fn lerp(from: Rgb, to: Rgb, ratio: f64) -> Rgb {
    let channel = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * ratio;
        v.trunc().clamp(0.0, 255.0) as u8
    };
    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(color_for(0.0), Rgb::WHITE);
        assert_eq!(color_for(5.0), Rgb::GREEN);
        assert_eq!(color_for(-5.0), Rgb::RED);
    }

    #[test]
    fn clamps_beyond_saturation() {
        assert_eq!(color_for(10.0), color_for(5.0));
        assert_eq!(color_for(-42.0), Rgb::RED);
    }

    #[test]
    fn midpoints() {
        // Halfway to red: 255 - 127.5 truncates to 127.
        assert_eq!(color_for(-2.5), Rgb(255, 127, 127));
        // Halfway to green: 255 - 127.5 and 255 - 63.5.
        assert_eq!(color_for(2.5), Rgb(127, 191, 127));
    }

    #[test]
    fn css() {
        assert_eq!(Rgb::RED.to_css(), "rgb(255, 0, 0)");
    }
}
