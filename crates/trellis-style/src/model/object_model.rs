//! The indexed style object model.

use std::collections::HashMap;

use super::{
    Breakpoint, BreakpointId, Instance, InstanceId, StyleDeclaration, StyleSource, StyleSourceId,
};
use crate::types::StyleValue;

/// All style declarations of a project, indexed for cascade lookups.
///
/// Declarations are indexed by style source and property, and style sources
/// are indexed by the instance they are attached to. The model is mutated
/// while the surrounding application rebuilds it and is shared immutably
/// while styles are resolved.
#[derive(Debug, Clone, Default)]
pub struct StyleObjectModel {
    breakpoints: Vec<Breakpoint>,
    style_sources: HashMap<StyleSourceId, StyleSource>,
    instances: HashMap<InstanceId, Instance>,
    /// source -> property -> declarations in insertion order.
    declarations: HashMap<StyleSourceId, HashMap<String, Vec<StyleDeclaration>>>,
    /// component -> property -> preset value.
    preset_styles: HashMap<String, HashMap<String, StyleValue>>,
}

impl StyleObjectModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a breakpoint, replacing one with the same id.
    pub fn add_breakpoint(&mut self, breakpoint: Breakpoint) {
        match self.breakpoints.iter_mut().find(|b| b.id == breakpoint.id) {
            Some(existing) => *existing = breakpoint,
            None => self.breakpoints.push(breakpoint),
        }
    }

    /// Add a style source, replacing one with the same id.
    pub fn add_style_source(&mut self, style_source: StyleSource) {
        self.style_sources.insert(style_source.id.clone(), style_source);
    }

    /// Add an instance, replacing one with the same id.
    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.insert(instance.id.clone(), instance);
    }

    /// Insert a declaration.
    ///
    /// A declaration already occupying the same
    /// `(source, breakpoint, state, property)` slot is replaced in place and
    /// returned.
    pub fn set_declaration(&mut self, declaration: StyleDeclaration) -> Option<StyleDeclaration> {
        let slot = self
            .declarations
            .entry(declaration.style_source_id.clone())
            .or_default()
            .entry(declaration.property.clone())
            .or_default();

        match slot.iter_mut().find(|d| d.same_slot(&declaration)) {
            Some(existing) => Some(std::mem::replace(existing, declaration)),
            None => {
                slot.push(declaration);
                None
            }
        }
    }

    /// Remove the declaration in a slot.
    pub fn remove_declaration(
        &mut self,
        style_source_id: &str,
        breakpoint_id: &str,
        state: Option<&str>,
        property: &str,
    ) -> Option<StyleDeclaration> {
        let slot = self
            .declarations
            .get_mut(style_source_id)?
            .get_mut(property)?;
        let index = slot.iter().position(|d| {
            d.breakpoint_id.as_str() == breakpoint_id && d.state.as_deref() == state
        })?;
        Some(slot.remove(index))
    }

    /// Set the preset value a component gives a property.
    pub fn set_preset_style(
        &mut self,
        component: impl Into<String>,
        property: impl Into<String>,
        value: StyleValue,
    ) {
        self.preset_styles
            .entry(component.into())
            .or_default()
            .insert(property.into(), value);
    }

    /// Get a breakpoint by id.
    pub fn breakpoint(&self, id: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|b| b.id.as_str() == id)
    }

    /// Get a style source by id.
    pub fn style_source(&self, id: &str) -> Option<&StyleSource> {
        self.style_sources.get(id)
    }

    /// Get an instance by id.
    pub fn instance(&self, id: &str) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// Style sources attached to an instance, in cascade order.
    ///
    /// Unknown instances have no style sources.
    pub fn style_sources_for(&self, instance_id: &str) -> &[StyleSourceId] {
        self.instances
            .get(instance_id)
            .map(|i| i.style_source_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Declarations of one property in one style source, across breakpoints
    /// and states.
    pub fn declarations(&self, style_source_id: &str, property: &str) -> &[StyleDeclaration] {
        self.declarations
            .get(style_source_id)
            .and_then(|by_property| by_property.get(property))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The preset value of a property for an instance's component.
    pub fn preset_style(&self, instance_id: &str, property: &str) -> Option<&StyleValue> {
        let component = self.instances.get(instance_id)?.component.as_deref()?;
        self.preset_styles.get(component)?.get(property)
    }

    /// Breakpoints matching a viewport, least specific first.
    ///
    /// Base breakpoints come first, then breakpoints by ascending
    /// `min_width`. The last entry is the active breakpoint.
    pub fn matching_breakpoints(&self, viewport_width: f64) -> Vec<BreakpointId> {
        let mut matching: Vec<&Breakpoint> = self
            .breakpoints
            .iter()
            .filter(|b| b.matches(viewport_width))
            .collect();
        matching.sort_by(|a, b| match (a.min_width, b.min_width) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(a), Some(b)) => a.total_cmp(&b),
        });
        matching.into_iter().map(|b| b.id.clone()).collect()
    }

    /// Iterate over breakpoints in insertion order.
    pub fn breakpoints(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    /// Get the total number of declarations.
    pub fn declaration_count(&self) -> usize {
        self.declarations
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}
