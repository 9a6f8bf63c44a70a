//! Tracing targets used by the style engine.
//!
//! The engine emits `tracing` events but never installs a subscriber. Filter
//! them with directives such as `trellis_style::vars=trace`:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis_style::cascade=trace")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Cascade winner selection.
    pub const CASCADE: &str = "trellis_style::cascade";
    /// Ancestor walks.
    pub const INHERITANCE: &str = "trellis_style::inheritance";
    /// Custom property substitution and cycle detection.
    pub const VARS: &str = "trellis_style::vars";
    /// Model and registry loading.
    pub const MODEL: &str = "trellis_style::model";
}
