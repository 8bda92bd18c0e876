//! Lowercase names for the plain enums, matching their JSON form.
//!
//! Parsing ignores ASCII case so `Center` and `center` both work on the
//! command line.

use crate::element::{Align, DisplayMode, TextVariant, Width};
use crate::error::UnknownKeyword;
use crate::slide::{Direction, Position, SlideKind};
use std::fmt;
use std::str::FromStr;

macro_rules! keywords {
    ($($ty:ident { $($variant:ident => $name:literal),+ $(,)? })+) => {$(
        impl $ty {
            pub const ALL: &[$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        UnknownKeyword::new(stringify!($ty), s, Self::ALL.iter().map(|v| v.as_str()))
                    })
            }
        }
    )+};
}

keywords! {
    Width { Fill => "fill", Hug => "hug" }
    Align { Left => "left", Center => "center", Right => "right", Justify => "justify" }
    TextVariant { Bold => "bold", Default => "default", Caption => "caption" }
    DisplayMode { Inline => "inline", Block => "block" }
    SlideKind { Info => "info", Qa => "qa" }
    Direction { Up => "up", Down => "down" }
    Position { Above => "above", Below => "below" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("Center".parse::<Align>().unwrap(), Align::Center);
        assert_eq!("below".parse::<Position>().unwrap(), Position::Below);
        assert_eq!("QA".parse::<SlideKind>().unwrap(), SlideKind::Qa);
    }

    #[test]
    fn test_unknown_keyword_lists_choices() {
        let err = "middle".parse::<Align>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown Align 'middle', expected one of: left, center, right, justify"
        );
    }

    #[test]
    fn test_names_match_json() {
        for variant in TextVariant::ALL {
            let json = serde_json::to_value(variant).unwrap();
            assert_eq!(json, variant.as_str());
        }
        for width in Width::ALL {
            assert_eq!(serde_json::to_value(width).unwrap(), width.as_str());
        }
    }
}
