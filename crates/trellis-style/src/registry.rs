//! Property registry: initial values and inheritance flags.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::types::StyleValue;
use crate::{Error, Result};

/// What the engine needs to know about a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Whether descendants without a value take the parent's value.
    pub inherited: bool,
    /// Value used when nothing is declared or inherited.
    pub initial: StyleValue,
}

/// Custom properties inherit and start out guaranteed-invalid.
static CUSTOM_PROPERTY: PropertyInfo = PropertyInfo {
    inherited: true,
    initial: StyleValue::Invalid,
};

/// Whether `property` names a custom property (`--name`).
pub fn is_custom_property(property: &str) -> bool {
    property.starts_with("--")
}

/// Read-only lookup table of standard properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyInfo>,
}

impl PropertyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in CSS properties.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(name, inherited, initial) in BUILTIN {
            registry.insert(name, inherited, builtin_initial(initial));
        }
        registry
    }

    /// Parse a registry from a JSON object of `name -> { inherited, initial }`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::json("property registry", e))
    }

    /// Load a registry from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let registry = Self::from_json(&content)?;
        tracing::debug!(
            target: targets::MODEL,
            path = %path.display(),
            properties = registry.len(),
            "Loaded property registry"
        );
        Ok(registry)
    }

    /// Register or replace a property.
    pub fn insert(&mut self, name: impl Into<String>, inherited: bool, initial: StyleValue) {
        self.properties
            .insert(name.into(), PropertyInfo { inherited, initial });
    }

    /// Overlay another registry; its entries win.
    pub fn merge(&mut self, other: PropertyRegistry) {
        self.properties.extend(other.properties);
    }

    /// Look up a property.
    ///
    /// Custom properties always resolve, inherited with an `invalid` initial
    /// value.
    pub fn get(&self, property: &str) -> Option<&PropertyInfo> {
        if is_custom_property(property) {
            return Some(&CUSTOM_PROPERTY);
        }
        self.properties.get(property)
    }

    /// Look up a property, failing for unknown standard properties.
    pub fn require(&self, property: &str) -> Result<&PropertyInfo> {
        self.get(property).ok_or_else(|| {
            tracing::warn!(target: targets::MODEL, property, "Property missing from registry");
            Error::unknown_property(property)
        })
    }

    /// Get the number of registered standard properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Compact initial value description for the built-in table.
#[derive(Clone, Copy)]
enum Initial {
    Keyword(&'static str),
    Px(f64),
    Number(f64),
}

fn builtin_initial(initial: Initial) -> StyleValue {
    match initial {
        Initial::Keyword(keyword) => StyleValue::keyword(keyword),
        Initial::Px(value) => StyleValue::px(value),
        Initial::Number(value) => StyleValue::number(value),
    }
}

use Initial::{Keyword, Number, Px};

const BUILTIN: &[(&str, bool, Initial)] = &[
    // Typography
    ("color", true, Keyword("black")),
    ("font-family", true, Keyword("serif")),
    ("font-size", true, Keyword("medium")),
    ("font-style", true, Keyword("normal")),
    ("font-weight", true, Number(400.0)),
    ("letter-spacing", true, Keyword("normal")),
    ("line-height", true, Keyword("normal")),
    ("text-align", true, Keyword("start")),
    ("text-decoration-line", false, Keyword("none")),
    ("text-decoration-color", false, Keyword("currentcolor")),
    ("text-indent", true, Px(0.0)),
    ("text-transform", true, Keyword("none")),
    ("white-space-collapse", true, Keyword("collapse")),
    ("word-spacing", true, Keyword("normal")),
    // Layout
    ("display", false, Keyword("inline")),
    ("position", false, Keyword("static")),
    ("top", false, Keyword("auto")),
    ("right", false, Keyword("auto")),
    ("bottom", false, Keyword("auto")),
    ("left", false, Keyword("auto")),
    ("z-index", false, Keyword("auto")),
    ("flex-direction", false, Keyword("row")),
    ("justify-content", false, Keyword("normal")),
    ("align-items", false, Keyword("normal")),
    ("row-gap", false, Keyword("normal")),
    ("column-gap", false, Keyword("normal")),
    // Size
    ("width", false, Keyword("auto")),
    ("height", false, Keyword("auto")),
    ("min-width", false, Keyword("auto")),
    ("min-height", false, Keyword("auto")),
    ("max-width", false, Keyword("none")),
    ("max-height", false, Keyword("none")),
    // Box model
    ("margin-top", false, Px(0.0)),
    ("margin-right", false, Px(0.0)),
    ("margin-bottom", false, Px(0.0)),
    ("margin-left", false, Px(0.0)),
    ("padding-top", false, Px(0.0)),
    ("padding-right", false, Px(0.0)),
    ("padding-bottom", false, Px(0.0)),
    ("padding-left", false, Px(0.0)),
    ("border-top-width", false, Keyword("medium")),
    ("border-right-width", false, Keyword("medium")),
    ("border-bottom-width", false, Keyword("medium")),
    ("border-left-width", false, Keyword("medium")),
    ("border-top-style", false, Keyword("none")),
    ("border-right-style", false, Keyword("none")),
    ("border-bottom-style", false, Keyword("none")),
    ("border-left-style", false, Keyword("none")),
    ("border-top-color", false, Keyword("currentcolor")),
    ("border-right-color", false, Keyword("currentcolor")),
    ("border-bottom-color", false, Keyword("currentcolor")),
    ("border-left-color", false, Keyword("currentcolor")),
    ("border-top-left-radius", false, Px(0.0)),
    ("border-top-right-radius", false, Px(0.0)),
    ("border-bottom-right-radius", false, Px(0.0)),
    ("border-bottom-left-radius", false, Px(0.0)),
    ("outline-color", false, Keyword("currentcolor")),
    // Background and effects
    ("background-color", false, Keyword("transparent")),
    ("background-image", false, Keyword("none")),
    ("box-shadow", false, Keyword("none")),
    ("opacity", false, Number(1.0)),
    ("filter", false, Keyword("none")),
    ("transform", false, Keyword("none")),
    ("transition-property", false, Keyword("all")),
    // Interaction
    ("cursor", true, Keyword("auto")),
    ("pointer-events", true, Keyword("auto")),
    ("visibility", true, Keyword("visible")),
];
