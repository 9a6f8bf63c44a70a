//! Style object model for the Trellis page builder.
//!
//! This crate computes the value a style property actually takes on an
//! instance of the design tree. It provides:
//!
//! - **Model**: style sources (local overrides and shared tokens), responsive
//!   breakpoints, per-state declarations and component presets
//! - **Cascading**: breakpoint, style source and pseudo-state ordering
//! - **Inheritance**: values flowing down the instance chain
//! - **Keywords**: `initial`, `inherit`, `unset` and `currentcolor`
//! - **Custom properties**: `var()` substitution with fallbacks and cycle
//!   detection
//!
//! # Example
//!
//! ```
//! use trellis_style::prelude::*;
//!
//! let mut model = StyleObjectModel::new();
//! model.add_breakpoint(Breakpoint::base("base"));
//! model.add_style_source(StyleSource::local("body-local"));
//! model.add_instance(Instance::new("body").with_style_sources(["body-local"]));
//! model.add_instance(Instance::new("text"));
//! model.set_declaration(StyleDeclaration::new(
//!     "body-local",
//!     "base",
//!     "color",
//!     StyleValue::keyword("blue"),
//! ));
//!
//! let registry = PropertyRegistry::builtin();
//! let selector = StyleSelector::new(["text", "body"]).breakpoints(["base"]);
//! let color = get_computed_style_decl(&model, &registry, &selector, "color")?;
//! assert_eq!(color.used_value, StyleValue::keyword("blue"));
//! # Ok::<(), trellis_style::Error>(())
//! ```

pub mod logging;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod selector;
pub mod types;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::model::{
        Breakpoint, BreakpointId, Instance, InstanceId, StyleDeclaration, StyleObjectModel,
        StyleSource, StyleSourceId, StyleSourceKind,
    };
    pub use crate::registry::{PropertyInfo, PropertyRegistry};
    pub use crate::resolve::{
        ComputedStyleDecl, StyleResolver, ValueSource, get_computed_style_decl,
        resolve_inherited_value, resolve_own_value,
    };
    pub use crate::selector::StyleSelector;
    pub use crate::types::{CssWideKeyword, StyleValue};
}
