//! Style sources, breakpoints, declarations and instances.

use serde::{Deserialize, Serialize};

use super::{BreakpointId, InstanceId, StyleSourceId};
use crate::types::StyleValue;

/// Whether a style source belongs to one instance or is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleSourceKind {
    /// Overrides owned by exactly one instance.
    Local,
    /// A named set of declarations attachable to many instances.
    Token,
}

/// A bag of declarations attachable to instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSource {
    /// Unique id.
    pub id: StyleSourceId,
    /// Local or token.
    #[serde(rename = "type")]
    pub kind: StyleSourceKind,
    /// Display name of a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StyleSource {
    /// Create a local style source.
    pub fn local(id: impl Into<StyleSourceId>) -> Self {
        Self {
            id: id.into(),
            kind: StyleSourceKind::Local,
            name: None,
        }
    }

    /// Create a named token.
    pub fn token(id: impl Into<StyleSourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: StyleSourceKind::Token,
            name: Some(name.into()),
        }
    }
}

/// A responsive viewport threshold.
///
/// Breakpoints without `min_width` are base breakpoints and sort first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Unique id.
    pub id: BreakpointId,
    /// Lower viewport bound in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
}

impl Breakpoint {
    /// Create the base breakpoint.
    pub fn base(id: impl Into<BreakpointId>) -> Self {
        Self {
            id: id.into(),
            min_width: None,
        }
    }

    /// Create a breakpoint active from `min_width` pixels.
    pub fn min_width(id: impl Into<BreakpointId>, min_width: f64) -> Self {
        Self {
            id: id.into(),
            min_width: Some(min_width),
        }
    }

    /// Whether the breakpoint applies to a viewport of `width` pixels.
    pub fn matches(&self, width: f64) -> bool {
        self.min_width.is_none_or(|min| width >= min)
    }
}

/// One property value of a style source at a breakpoint and optional state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDeclaration {
    /// The style source the declaration belongs to.
    pub style_source_id: StyleSourceId,
    /// The breakpoint the declaration applies at.
    pub breakpoint_id: BreakpointId,
    /// Pseudo-state such as `:hover`; `None` applies in every state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Property name, e.g. `color` or `--brand`.
    pub property: String,
    /// The declared value.
    pub value: StyleValue,
}

impl StyleDeclaration {
    /// Create a stateless declaration.
    pub fn new(
        style_source_id: impl Into<StyleSourceId>,
        breakpoint_id: impl Into<BreakpointId>,
        property: impl Into<String>,
        value: StyleValue,
    ) -> Self {
        Self {
            style_source_id: style_source_id.into(),
            breakpoint_id: breakpoint_id.into(),
            state: None,
            property: property.into(),
            value,
        }
    }

    /// Restrict the declaration to a pseudo-state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Whether two declarations occupy the same
    /// `(source, breakpoint, state, property)` slot.
    pub fn same_slot(&self, other: &StyleDeclaration) -> bool {
        self.style_source_id == other.style_source_id
            && self.breakpoint_id == other.breakpoint_id
            && self.state == other.state
            && self.property == other.property
    }
}

/// A node of the design tree as seen by the style engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Unique id.
    pub id: InstanceId,
    /// Attached style sources in cascade order; later entries win.
    #[serde(default)]
    pub style_source_ids: Vec<StyleSourceId>,
    /// Component name used to look up preset styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Instance {
    /// Create an instance with no style sources.
    pub fn new(id: impl Into<InstanceId>) -> Self {
        Self {
            id: id.into(),
            style_source_ids: vec![],
            component: None,
        }
    }

    /// Attach style sources in cascade order.
    pub fn with_style_sources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StyleSourceId>,
    {
        self.style_source_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}
