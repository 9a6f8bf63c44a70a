//! Style resolver bound to one model snapshot.

use std::collections::BTreeMap;

use super::cascade::resolve_own_value;
use super::computed::{ComputedStyleDecl, Resolution};
use super::inheritance::resolve_inherited_value;
use crate::model::{StyleDeclaration, StyleObjectModel};
use crate::registry::PropertyRegistry;
use crate::selector::StyleSelector;
use crate::types::StyleValue;
use crate::Result;

/// Resolves styles against one model snapshot and property registry.
///
/// The resolver only borrows its inputs and keeps no state between calls,
/// so it can be copied into worker threads freely.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    model: &'a StyleObjectModel,
    registry: &'a PropertyRegistry,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver.
    pub fn new(model: &'a StyleObjectModel, registry: &'a PropertyRegistry) -> Self {
        Self { model, registry }
    }

    /// Get the model.
    pub fn model(&self) -> &'a StyleObjectModel {
        self.model
    }

    /// Get the property registry.
    pub fn registry(&self) -> &'a PropertyRegistry {
        self.registry
    }

    /// The declaration the target instance itself sets, if any.
    ///
    /// Useful to tell a locally set value apart from an inherited or
    /// default one.
    pub fn own_value(
        &self,
        selector: &StyleSelector,
        property: &str,
    ) -> Option<&'a StyleDeclaration> {
        let target = selector.target()?;
        resolve_own_value(
            self.model,
            target.as_str(),
            property,
            &selector.matching_breakpoints,
            &selector.matching_states,
        )
    }

    /// The value the target would inherit from its ancestors.
    pub fn inherited_value(
        &self,
        selector: &StyleSelector,
        property: &str,
    ) -> Result<Option<StyleValue>> {
        resolve_inherited_value(self.model, self.registry, selector, property)
    }

    /// Compute the used value of a property.
    pub fn computed(&self, selector: &StyleSelector, property: &str) -> Result<ComputedStyleDecl> {
        Resolution::new(self.model, self.registry, selector).resolve(property)
    }

    /// Compute several properties of the same instance.
    ///
    /// The cascade memo is shared between the properties.
    pub fn computed_all<'p>(
        &self,
        selector: &StyleSelector,
        properties: impl IntoIterator<Item = &'p str>,
    ) -> Result<BTreeMap<String, ComputedStyleDecl>> {
        let mut resolution = Resolution::new(self.model, self.registry, selector);
        properties
            .into_iter()
            .map(|property| Ok((property.to_owned(), resolution.resolve(property)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Breakpoint, Instance, StyleSource};
    use crate::resolve::ValueSource;

    fn model() -> StyleObjectModel {
        let mut model = StyleObjectModel::new();
        model.add_breakpoint(Breakpoint::base("base"));
        model.add_style_source(StyleSource::token("card", "Card"));
        model.add_style_source(StyleSource::local("local"));
        model.add_instance(Instance::new("parent").with_style_sources(["card"]));
        model.add_instance(Instance::new("child").with_style_sources(["local"]));
        model.set_declaration(StyleDeclaration::new(
            "card",
            "base",
            "color",
            StyleValue::keyword("navy"),
        ));
        model.set_declaration(StyleDeclaration::new(
            "local",
            "base",
            "width",
            StyleValue::px(10.0),
        ));
        model
    }

    #[test]
    fn own_value_ignores_inheritance() {
        let model = model();
        let registry = PropertyRegistry::builtin();
        let resolver = StyleResolver::new(&model, &registry);
        let selector = StyleSelector::new(["child", "parent"]).breakpoints(["base"]);

        assert!(resolver.own_value(&selector, "color").is_none());
        assert!(resolver.own_value(&selector, "width").is_some());
        assert_eq!(
            resolver.inherited_value(&selector, "color").unwrap(),
            Some(StyleValue::keyword("navy"))
        );
    }

    #[test]
    fn computed_all_reports_sources() {
        let model = model();
        let registry = PropertyRegistry::builtin();
        let resolver = StyleResolver::new(&model, &registry);
        let selector = StyleSelector::new(["child", "parent"]).breakpoints(["base"]);

        let computed = resolver
            .computed_all(&selector, ["color", "width", "height"])
            .unwrap();

        assert_eq!(computed.len(), 3);
        assert_eq!(
            computed["color"].source,
            ValueSource::Inherited {
                instance_id: "parent".into()
            }
        );
        assert_eq!(computed["width"].source, ValueSource::Local);
        assert_eq!(computed["height"].source, ValueSource::Default);
        assert_eq!(computed["height"].used_value, StyleValue::keyword("auto"));

        let parent = StyleSelector::new(["parent"]).breakpoints(["base"]);
        assert_eq!(
            resolver.computed(&parent, "color").unwrap().source,
            ValueSource::Token {
                style_source_id: "card".into()
            }
        );
    }

    #[test]
    fn computed_all_stops_at_unknown_property() {
        let model = model();
        let registry = PropertyRegistry::builtin();
        let resolver = StyleResolver::new(&model, &registry);
        let selector = StyleSelector::new(["child"]).breakpoints(["base"]);

        assert!(resolver.computed_all(&selector, ["color", "colour"]).is_err());
    }
}
