//! Hex to translucent `rgba()` conversion for link colors.

use sankey_core::{Result, SankeyError};

/// Opacity applied to link colors unless overridden.
pub const DEFAULT_LINK_ALPHA: f64 = 0.5;

/// Convert a 6-digit hex color (leading `#` optional) into `rgba(r,g,b,alpha)`.
///
/// # Example
/// ```
/// use sankey_chart::color_transform;
///
/// assert_eq!(color_transform("#0088cc", 0.5).unwrap(), "rgba(0,136,204,0.5)");
/// ```
pub fn color_transform(hex: &str, alpha: f64) -> Result<String> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SankeyError::InvalidParameter(format!(
            "expected a 6-digit hex color, got {hex:?}"
        )));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(SankeyError::InvalidParameter(format!(
            "opacity must be within [0, 1], got {alpha}"
        )));
    }

    let channel = |at: usize| {
        u8::from_str_radix(&digits[at..at + 2], 16)
            .map_err(|e| SankeyError::InvalidParameter(format!("bad hex color {hex:?}: {e}")))
    };
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);

    Ok(format!("rgba({r},{g},{b},{alpha})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Splits `rgba(r,g,b,a)` back into its parts.
    fn parse_rgba(s: &str) -> (u8, u8, u8, f64) {
        let inner = s.strip_prefix("rgba(").unwrap().strip_suffix(')').unwrap();
        let parts: Vec<&str> = inner.split(',').collect();
        (
            parts[0].parse().unwrap(),
            parts[1].parse().unwrap(),
            parts[2].parse().unwrap(),
            parts[3].parse().unwrap(),
        )
    }

    #[rstest]
    #[case("#666666", 0.5, (102, 102, 102))]
    #[case("#0088cc", 0.5, (0, 136, 204))]
    #[case("ffffff", 1.0, (255, 255, 255))]
    #[case("#000000", 0.0, (0, 0, 0))]
    #[case("#A1b2C3", 0.25, (161, 178, 195))]
    fn test_channels_and_opacity(
        #[case] hex: &str,
        #[case] alpha: f64,
        #[case] rgb: (u8, u8, u8),
    ) {
        let (r, g, b, a) = parse_rgba(&color_transform(hex, alpha).unwrap());
        assert_eq!((r, g, b), rgb);
        assert_eq!(a, alpha);
    }

    #[test]
    fn test_default_alpha_format() {
        assert_eq!(
            color_transform("#666666", DEFAULT_LINK_ALPHA).unwrap(),
            "rgba(102,102,102,0.5)"
        );
    }

    #[rstest]
    #[case("#fff")]
    #[case("#12345g")]
    #[case("")]
    #[case("#+12345")]
    #[case("#ééé")]
    fn test_rejects_malformed_hex(#[case] hex: &str) {
        assert!(matches!(
            color_transform(hex, 0.5),
            Err(SankeyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_alpha() {
        assert!(color_transform("#666666", 1.5).is_err());
        assert!(color_transform("#666666", f64::NAN).is_err());
    }
}
