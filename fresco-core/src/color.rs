// Strict #RRGGBB color parsing for the compositor

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A flat RGB color parsed from a `#RRGGBB` string.
///
/// Exactly seven characters: a leading `#` followed by six hex digits.
/// No alpha, no `#RGB` short form, no color names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for ColorSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // from_str_radix alone is too lenient: it accepts a leading sign,
        // so every character after '#' must be checked itself.
        if !s.is_ascii()
            || s.len() != 7
            || !s.starts_with('#')
            || !s[1..].chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(Error::Validation(format!(
                "invalid color '{}': expected #RRGGBB",
                s
            )));
        }

        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| {
                Error::Validation(format!("invalid color '{}': expected #RRGGBB", s))
            })
        };

        Ok(Self {
            r: parse(1..3)?,
            g: parse(3..5)?,
            b: parse(5..7)?,
        })
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_color() {
        let color: ColorSpec = "#112233".parse().unwrap();
        assert_eq!(color.channels(), [0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower: ColorSpec = "#aabbcc".parse().unwrap();
        let upper: ColorSpec = "#AABBCC".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_rejects_missing_hash() {
        assert!("123456".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_short_form() {
        assert!("#123".parse::<ColorSpec>().is_err());
        assert!("#12".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_color_names() {
        assert!("red".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_non_hex_digits() {
        assert!("#12345g".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_signed_digit_pairs() {
        // from_str_radix would happily parse "+1" as 1.
        assert!("#+1+2+3".parse::<ColorSpec>().is_err());
        assert!("#-1-2-3".parse::<ColorSpec>().is_err());
        assert!("#11+233".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_alpha() {
        assert!("#11223344".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!("#1122é3".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = ColorSpec::new(0xFF, 0x00, 0x7F);
        let parsed: ColorSpec = color.to_string().parse().unwrap();
        assert_eq!(color, parsed);
    }
}
