use crate::core::data::colour::Colour;

/// Standard HSV to RGB conversion.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `value` in `[0, 1]`.
/// Channels are rounded half to even.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Colour {
    let chroma = value * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let matched = value - chroma;

    let (r1, g1, b1) = if (0.0..60.0).contains(&hue) {
        (chroma, x, 0.0)
    } else if (60.0..120.0).contains(&hue) {
        (x, chroma, 0.0)
    } else if (120.0..180.0).contains(&hue) {
        (0.0, chroma, x)
    } else if (180.0..240.0).contains(&hue) {
        (0.0, x, chroma)
    } else if (240.0..300.0).contains(&hue) {
        (x, 0.0, chroma)
    } else if (300.0..360.0).contains(&hue) {
        (chroma, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    Colour {
        r: to_channel(r1 + matched),
        g: to_channel(g1 + matched),
        b: to_channel(b1 + matched),
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Colour { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Colour { r: 255, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Colour { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Colour { r: 0, g: 255, b: 255 });
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Colour { r: 0, g: 0, b: 255 });
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), Colour { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_intermediate_hue() {
        // 30° is halfway from red to yellow: x = 0.5 → 127.5 rounds to even
        assert_eq!(hsv_to_rgb(30.0, 1.0, 1.0), Colour { r: 255, g: 128, b: 0 });
    }

    #[test]
    fn test_zero_value_is_black() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), Colour::BLACK);
        assert_eq!(hsv_to_rgb(200.0, 1.0, 0.0), Colour::BLACK);
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb(123.0, 0.0, 1.0), Colour { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_hue_outside_wheel_is_black() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Colour::BLACK);
        assert_eq!(hsv_to_rgb(-1.0, 1.0, 1.0), Colour::BLACK);
    }
}
