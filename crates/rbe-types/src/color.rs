use serde::{Deserialize, Serialize};

/// An RGB color triple.
///
/// Serializes as a bare `[r, g, b]` array, matching the settings file and
/// renderer contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
    pub const RED: Self = Self(255, 0, 0);
    pub const GREEN: Self = Self(0, 255, 0);
    pub const BLUE: Self = Self(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// White-to-blue intensity ramp. `t` is clamped to `[0, 1]`;
    /// 0 maps to white, 1 to saturated blue.
    pub fn blue_intensity(t: f64) -> Self {
        let c = Self::ramp_channel(t);
        Self(c, c, 255)
    }

    /// White-to-red intensity ramp. `t` is clamped to `[0, 1]`;
    /// 0 maps to white, 1 to saturated red.
    pub fn red_intensity(t: f64) -> Self {
        let c = Self::ramp_channel(t);
        Self(255, c, c)
    }

    fn ramp_channel(t: f64) -> u8 {
        let t = t.clamp(0.0, 1.0);
        (255.0 - t * 255.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blue_ramp_endpoints() {
        assert_eq!(Color::blue_intensity(0.0), Color::WHITE);
        assert_eq!(Color::blue_intensity(1.0), Color::BLUE);
    }

    #[test]
    fn test_red_ramp_endpoints() {
        assert_eq!(Color::red_intensity(0.0), Color::WHITE);
        assert_eq!(Color::red_intensity(1.0), Color::RED);
    }

    #[test]
    fn test_ramp_clamps_out_of_range() {
        assert_eq!(Color::blue_intensity(-0.5), Color::WHITE);
        assert_eq!(Color::red_intensity(7.0), Color::RED);
    }

    #[test]
    fn test_midpoint_value() {
        let Color(r, g, b) = Color::blue_intensity(0.5);
        assert_eq!(b, 255);
        assert_eq!(r, g);
        assert_eq!(r, 128); // 255 - 127.5 rounds to 128
    }

    #[test]
    fn test_serializes_as_triple() {
        let json = serde_json::to_string(&Color(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
    }
}
