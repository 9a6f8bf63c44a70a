//! Style property value types.
//!
//! Values reach the engine already parsed. Apart from the CSS-wide keywords,
//! `currentcolor` and `var()` references, payloads are opaque and are handed
//! back unchanged as used values.
//!
//! # Example
//!
//! ```
//! use trellis_style::prelude::*;
//!
//! let width = StyleValue::px(10.0);
//! assert_eq!(width.to_string(), "10px");
//!
//! let color = StyleValue::var("--brand", vec![StyleValue::keyword("red")]);
//! assert_eq!(color.to_string(), "var(--brand, red)");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declared, computed or used style value.
///
/// The JSON form is tagged by `type`, e.g.
/// `{"type":"unit","value":10,"unit":"px"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleValue {
    /// An identifier such as `auto`, `inherit` or `currentcolor`.
    Keyword { value: String },
    /// A number with a unit. Unitless numbers use the unit `number`.
    Unit { value: f64, unit: String },
    /// An sRGB color.
    Rgb { r: u8, g: u8, b: u8, alpha: f32 },
    /// Comma separated layers (backgrounds, shadows, transitions).
    Layers { value: Vec<StyleValue> },
    /// Space separated components.
    Tuple { value: Vec<StyleValue> },
    /// A CSS function call other than `var()`.
    Function { name: String, args: Box<StyleValue> },
    /// Raw text the upstream parser kept as-is.
    Unparsed { value: String },
    /// A custom property reference with an ordered fallback chain.
    Var {
        name: String,
        #[serde(default)]
        fallbacks: Vec<StyleValue>,
    },
    /// Guaranteed-invalid: a custom property that could not be resolved.
    Invalid,
}

/// The CSS-wide keywords that change how a value is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssWideKeyword {
    /// Use the property's initial value.
    Initial,
    /// Take the value from the nearest ancestor.
    Inherit,
    /// `Inherit` for inherited properties, `Initial` otherwise.
    Unset,
}

impl CssWideKeyword {
    /// Parse from a keyword, ignoring ASCII case.
    pub fn from_css(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("initial") {
            Some(Self::Initial)
        } else if s.eq_ignore_ascii_case("inherit") {
            Some(Self::Inherit)
        } else if s.eq_ignore_ascii_case("unset") {
            Some(Self::Unset)
        } else {
            None
        }
    }

    /// Reduce `Unset` to `Inherit` or `Initial` for a property.
    pub fn for_property(self, inherited: bool) -> Self {
        match self {
            Self::Unset if inherited => Self::Inherit,
            Self::Unset => Self::Initial,
            other => other,
        }
    }
}

impl StyleValue {
    /// Create a keyword value.
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword {
            value: value.into(),
        }
    }

    /// Create a value with a unit.
    pub fn unit(value: f64, unit: impl Into<String>) -> Self {
        Self::Unit {
            value,
            unit: unit.into(),
        }
    }

    /// Create a pixel value.
    pub fn px(value: f64) -> Self {
        Self::unit(value, "px")
    }

    /// Create a unitless number.
    pub fn number(value: f64) -> Self {
        Self::unit(value, "number")
    }

    /// Create an opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b, alpha: 1.0 }
    }

    /// Create an unparsed value.
    pub fn unparsed(value: impl Into<String>) -> Self {
        Self::Unparsed {
            value: value.into(),
        }
    }

    /// Create a `var()` reference.
    pub fn var(name: impl Into<String>, fallbacks: Vec<StyleValue>) -> Self {
        Self::Var {
            name: name.into(),
            fallbacks,
        }
    }

    /// The CSS-wide keyword this value spells, if any.
    pub fn css_wide_keyword(&self) -> Option<CssWideKeyword> {
        match self {
            Self::Keyword { value } => CssWideKeyword::from_css(value),
            _ => None,
        }
    }

    /// Check for the `currentcolor` keyword in any letter case.
    pub fn is_current_color(&self) -> bool {
        matches!(self, Self::Keyword { value } if value.eq_ignore_ascii_case("currentcolor"))
    }

    /// Check whether this is a keyword equal to `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Keyword { value } if value.eq_ignore_ascii_case(keyword))
    }

    /// Check for the guaranteed-invalid sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword { value } | Self::Unparsed { value } => f.write_str(value),
            Self::Unit { value, unit } => match unit.as_str() {
                "number" => write!(f, "{value}"),
                "%" => write!(f, "{value}%"),
                _ => write!(f, "{value}{unit}"),
            },
            Self::Rgb { r, g, b, alpha } => {
                if *alpha >= 1.0 {
                    write!(f, "rgb({r}, {g}, {b})")
                } else {
                    write!(f, "rgba({r}, {g}, {b}, {alpha})")
                }
            }
            Self::Layers { value } => write_joined(f, value, ", "),
            Self::Tuple { value } => write_joined(f, value, " "),
            Self::Function { name, args } => write!(f, "{name}({args})"),
            Self::Var { name, fallbacks } => {
                write!(f, "var({name}")?;
                for fallback in fallbacks {
                    write!(f, ", {fallback}")?;
                }
                f.write_str(")")
            }
            // Guaranteed-invalid has no textual form.
            Self::Invalid => Ok(()),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, values: &[StyleValue], separator: &str) -> fmt::Result {
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}
