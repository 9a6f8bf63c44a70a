//! Style value types.

mod value;

pub use value::{CssWideKeyword, StyleValue};
