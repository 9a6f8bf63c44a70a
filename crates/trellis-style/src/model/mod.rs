//! Style object model: sources, breakpoints, declarations and instances.

mod declaration;
mod ids;
mod object_model;
mod snapshot;

pub use declaration::{Breakpoint, Instance, StyleDeclaration, StyleSource, StyleSourceKind};
pub use ids::{BreakpointId, InstanceId, StyleSourceId};
pub use object_model::StyleObjectModel;
pub use snapshot::{ModelSnapshot, PresetStyle};
