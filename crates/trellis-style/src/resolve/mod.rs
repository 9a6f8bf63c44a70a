//! Style resolution: cascade, inheritance and used values.

mod cache;
mod cascade;
mod computed;
mod engine;
mod inheritance;

pub use cascade::{Cascaded, CascadeRank, resolve_cascaded_value, resolve_own_value};
pub use computed::{ComputedStyleDecl, ValueSource, get_computed_style_decl};
pub use engine::StyleResolver;
pub use inheritance::resolve_inherited_value;
