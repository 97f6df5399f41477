//! Calendar colors
//!
//! Calendar entries carry a display color in the `#RRGGBB` form. The schedule and the projector pass
//! colors through untouched: checking them is the job of whoever creates the entry, with these helpers.

use crate::error::{Error, Result};

/// Accept exactly `#RRGGBB` (hex digits in any case)
pub fn validate_calendar_color(color: &str) -> Result<()> {
    let bytes = color.as_bytes();
    let valid = bytes.len() == 7
        && bytes[0] == b'#'
        && bytes[1..].iter().all(|b| b.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidColor(color.to_string()))
    }
}

/// Turn any opaque CSS color (`blue`, `#abc`, `rgb(10, 20, 30)`, `hsl(...)`...) into a lowercase `#rrggbb`
pub fn normalize_calendar_color(color: &str) -> Result<String> {
    let parsed = match csscolorparser::parse(color.trim()) {
        Ok(c) => c,
        Err(err) => {
            log::debug!("Unable to parse color {:?}: {}", color, err);
            return Err(Error::InvalidColor(color.to_string()));
        }
    };
    if parsed.a < 1.0 {
        return Err(Error::InvalidColor(color.to_string()));
    }

    Ok(format!("#{:02x}{:02x}{:02x}",
        channel_to_u8(f64::from(parsed.r)),
        channel_to_u8(f64::from(parsed.g)),
        channel_to_u8(f64::from(parsed.b))))
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().max(0.0).min(255.0) as u8
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_pattern() {
        assert!(validate_calendar_color("#1E88E5").is_ok());
        assert!(validate_calendar_color("#ff00aa").is_ok());
        for bad in &["blue", "#FFF", "1E88E5", "#1E88E5FF", "#GG0000", ""] {
            assert!(matches!(validate_calendar_color(bad), Err(Error::InvalidColor(_))), "{:?}", bad);
        }
    }

    #[test]
    fn css_colors_are_normalized() {
        assert_eq!(normalize_calendar_color("blue").unwrap(), "#0000ff");
        assert_eq!(normalize_calendar_color("#ABC").unwrap(), "#aabbcc");
        assert_eq!(normalize_calendar_color(" rgb(255, 128, 0) ").unwrap(), "#ff8000");
        assert_eq!(normalize_calendar_color("#1E88E5").unwrap(), "#1e88e5");
    }

    #[test]
    fn normalized_colors_pass_validation() {
        for input in &["red", "teal", "#123", "hsl(120, 100%, 25%)"] {
            let color = normalize_calendar_color(input).unwrap();
            assert!(validate_calendar_color(&color).is_ok(), "{} -> {}", input, color);
        }
    }

    #[test]
    fn rejects_unknown_and_translucent() {
        assert!(normalize_calendar_color("not-a-color").is_err());
        assert!(normalize_calendar_color("rgba(0, 0, 0, 0.5)").is_err());
    }
}
