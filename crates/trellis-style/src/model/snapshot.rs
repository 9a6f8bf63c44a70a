//! Loading a model from a serialized project snapshot.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Breakpoint, Instance, StyleDeclaration, StyleObjectModel, StyleSource};
use crate::logging::targets;
use crate::types::StyleValue;
use crate::{Error, Result};

/// A component's default value for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetStyle {
    /// Component name, matched against [`Instance::component`].
    pub component: String,
    /// Property name.
    pub property: String,
    /// Preset value.
    pub value: StyleValue,
}

/// Serialized form of a [`StyleObjectModel`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSnapshot {
    #[serde(default)]
    pub breakpoints: Vec<Breakpoint>,
    #[serde(default)]
    pub style_sources: Vec<StyleSource>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub styles: Vec<StyleDeclaration>,
    #[serde(default)]
    pub preset_styles: Vec<PresetStyle>,
}

impl StyleObjectModel {
    /// Build a model from a snapshot.
    ///
    /// Every declaration must name a known style source and breakpoint, and
    /// every instance must name known style sources.
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Result<Self> {
        let source_ids: HashSet<&str> = snapshot
            .style_sources
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        let breakpoint_ids: HashSet<&str> =
            snapshot.breakpoints.iter().map(|b| b.id.as_str()).collect();

        for instance in &snapshot.instances {
            if let Some(id) = instance
                .style_source_ids
                .iter()
                .find(|id| !source_ids.contains(id.as_str()))
            {
                return Err(Error::UnknownStyleSource { id: id.to_string() });
            }
        }
        for declaration in &snapshot.styles {
            if !source_ids.contains(declaration.style_source_id.as_str()) {
                return Err(Error::UnknownStyleSource {
                    id: declaration.style_source_id.to_string(),
                });
            }
            if !breakpoint_ids.contains(declaration.breakpoint_id.as_str()) {
                return Err(Error::UnknownBreakpoint {
                    id: declaration.breakpoint_id.to_string(),
                });
            }
        }

        let mut model = Self::new();
        for breakpoint in snapshot.breakpoints {
            model.add_breakpoint(breakpoint);
        }
        for style_source in snapshot.style_sources {
            model.add_style_source(style_source);
        }
        for instance in snapshot.instances {
            model.add_instance(instance);
        }
        for declaration in snapshot.styles {
            model.set_declaration(declaration);
        }
        for preset in snapshot.preset_styles {
            model.set_preset_style(preset.component, preset.property, preset.value);
        }

        tracing::debug!(
            target: targets::MODEL,
            declarations = model.declaration_count(),
            "Loaded style object model"
        );
        Ok(model)
    }

    /// Parse a model from snapshot JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ModelSnapshot =
            serde_json::from_str(json).map_err(|e| Error::json("model snapshot", e))?;
        Self::from_snapshot(snapshot)
    }

    /// Load a model from a snapshot JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content)
    }
}
