//! Inheritance: taking values from ancestor instances.

use super::computed::{ComputedStyleDecl, Resolution, ValueSource};
use crate::logging::targets;
use crate::model::StyleObjectModel;
use crate::registry::PropertyRegistry;
use crate::selector::StyleSelector;
use crate::types::StyleValue;
use crate::Result;

/// Find the used value `property` would inherit from the nearest ancestor
/// that defines it.
///
/// Ancestors are walked nearest first. Pseudo-states never apply to them.
/// The ancestor's value is fully resolved in the ancestor's own scope, so
/// keywords and `var()` references there see that ancestor's custom
/// properties. Returns `None` when no ancestor defines the property.
pub fn resolve_inherited_value(
    model: &StyleObjectModel,
    registry: &PropertyRegistry,
    selector: &StyleSelector,
    property: &str,
) -> Result<Option<StyleValue>> {
    registry.require(property)?;
    let inherited = Resolution::new(model, registry, selector).inherited(0, property)?;
    Ok(inherited.map(|decl| decl.used_value))
}

impl Resolution<'_> {
    /// Resolve `property` at the nearest ancestor of `depth` with a
    /// cascaded value.
    pub(super) fn inherited(
        &mut self,
        depth: usize,
        property: &str,
    ) -> Result<Option<ComputedStyleDecl>> {
        let selector = self.selector;

        for ancestor in depth + 1..selector.instance_selector.len() {
            if self.cascaded(ancestor, property).is_none() {
                continue;
            }

            let instance_id = selector.instance_selector[ancestor].clone();
            tracing::trace!(
                target: targets::INHERITANCE,
                property,
                from = %instance_id,
                hops = ancestor - depth,
                "Inheriting value"
            );
            let decl = self.computed(ancestor, property)?;
            return Ok(Some(ComputedStyleDecl {
                source: ValueSource::Inherited { instance_id },
                cascaded_value: None,
                ..decl
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Breakpoint, Instance, StyleDeclaration, StyleSource};

    fn tree() -> StyleObjectModel {
        let mut model = StyleObjectModel::new();
        model.add_breakpoint(Breakpoint::base("base"));
        for id in ["leaf", "middle", "root"] {
            model.add_style_source(StyleSource::local(id));
            model.add_instance(Instance::new(id).with_style_sources([id]));
        }
        model
    }

    fn selector() -> StyleSelector {
        StyleSelector::new(["leaf", "middle", "root"]).breakpoints(["base"])
    }

    #[test]
    fn nearest_ancestor_wins() {
        let mut model = tree();
        let registry = PropertyRegistry::builtin();
        model.set_declaration(StyleDeclaration::new(
            "root",
            "base",
            "color",
            StyleValue::keyword("red"),
        ));
        model.set_declaration(StyleDeclaration::new(
            "middle",
            "base",
            "color",
            StyleValue::keyword("blue"),
        ));

        let value = resolve_inherited_value(&model, &registry, &selector(), "color").unwrap();
        assert_eq!(value, Some(StyleValue::keyword("blue")));
    }

    #[test]
    fn nothing_to_inherit() {
        let model = tree();
        let registry = PropertyRegistry::builtin();
        let value = resolve_inherited_value(&model, &registry, &selector(), "color").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn ancestor_states_are_ignored() {
        let mut model = tree();
        let registry = PropertyRegistry::builtin();
        model.set_declaration(
            StyleDeclaration::new("middle", "base", "color", StyleValue::keyword("red"))
                .with_state(":hover"),
        );

        let selector = selector().states([":hover"]);
        let value = resolve_inherited_value(&model, &registry, &selector, "color").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn ancestor_keywords_resolve_in_ancestor_scope() {
        let mut model = tree();
        let registry = PropertyRegistry::builtin();
        model.set_declaration(StyleDeclaration::new(
            "root",
            "base",
            "color",
            StyleValue::keyword("green"),
        ));
        model.set_declaration(StyleDeclaration::new(
            "middle",
            "base",
            "color",
            StyleValue::keyword("inherit"),
        ));

        let value = resolve_inherited_value(&model, &registry, &selector(), "color").unwrap();
        assert_eq!(value, Some(StyleValue::keyword("green")));
    }

    #[test]
    fn unknown_property_is_rejected() {
        let model = tree();
        let registry = PropertyRegistry::builtin();
        assert!(resolve_inherited_value(&model, &registry, &selector(), "colour").is_err());
    }
}
