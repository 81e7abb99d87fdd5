//! Linear `[r, g, b]` colors and `#rrggbb` parsing.

use surfviz_core::{Result, SurfvizError};

/// Color with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Parse `#rrggbb` (or `rrggbb`) into an [`Rgb`].
pub fn parse_hex_color(s: &str) -> Result<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SurfvizError::InvalidSetting(format!(
            "color '{}' is not of the form #rrggbb",
            s
        )));
    }

    let mut rgb = [0.0f32; 3];
    for (k, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[k * 2..k * 2 + 2], 16)
            .map_err(|e| SurfvizError::InvalidSetting(format!("color '{}': {}", s, e)))?;
        *channel = byte as f32 / 255.0;
    }
    Ok(rgb)
}

/// Format an [`Rgb`] as lowercase `#rrggbb`.
pub fn to_hex_color(rgb: Rgb) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let rgb = parse_hex_color("#44ff88").unwrap();
        approx::assert_abs_diff_eq!(rgb[0], 0x44 as f32 / 255.0);
        approx::assert_abs_diff_eq!(rgb[1], 1.0);
        approx::assert_abs_diff_eq!(rgb[2], 0x88 as f32 / 255.0);
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(parse_hex_color("000000").unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#00000é").is_err());
    }

    #[test]
    fn test_parse_rejects_signed_channels() {
        // u8::from_str_radix alone would accept "+4"
        for bad in ["#+4+4+4", "+4+4+4", "#-10000", "#4 4 44"] {
            assert!(
                matches!(parse_hex_color(bad), Err(SurfvizError::InvalidSetting(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(to_hex_color(parse_hex_color("#ADD8E6").unwrap()), "#add8e6");
    }
}
