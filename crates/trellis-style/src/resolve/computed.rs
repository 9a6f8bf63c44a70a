//! Used-value resolution: keywords, `currentcolor` and `var()` substitution.

use std::collections::HashSet;

use super::cache::CascadeCache;
use super::cascade::{Cascaded, cascaded_with};
use crate::logging::targets;
use crate::model::{InstanceId, StyleObjectModel, StyleSourceId, StyleSourceKind};
use crate::registry::{PropertyInfo, PropertyRegistry, is_custom_property};
use crate::selector::StyleSelector;
use crate::types::{CssWideKeyword, StyleValue};
use crate::Result;

/// Where the value of a computed declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueSource {
    /// A local style source of the instance.
    Local,
    /// A token attached to the instance.
    Token { style_source_id: StyleSourceId },
    /// The preset of the instance's component.
    Preset,
    /// An ancestor's value.
    Inherited { instance_id: InstanceId },
    /// The property's initial value.
    Default,
}

/// The outcome of resolving one property for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyleDecl {
    /// The resolved property.
    pub property: String,
    /// Where the value came from.
    pub source: ValueSource,
    /// The instance's own cascaded value, before keyword and `var()`
    /// resolution.
    pub cascaded_value: Option<StyleValue>,
    /// The final value.
    pub used_value: StyleValue,
}

/// Compute the used value of `property` for the first instance of
/// `selector`.
///
/// Never fails on user-authored content: custom property cycles and broken
/// references become `invalid` for custom properties and the initial value
/// for standard ones. Fails only when a standard property needed along the
/// way is missing from the registry.
pub fn get_computed_style_decl(
    model: &StyleObjectModel,
    registry: &PropertyRegistry,
    selector: &StyleSelector,
    property: &str,
) -> Result<ComputedStyleDecl> {
    Resolution::new(model, registry, selector).resolve(property)
}

/// State of one top-level resolution.
///
/// Mutually recursive cascade, inheritance and substitution steps share the
/// cascade memo and the set of custom properties currently being
/// substituted. Both are dropped with the resolution.
pub(crate) struct Resolution<'a> {
    pub(super) model: &'a StyleObjectModel,
    pub(super) registry: &'a PropertyRegistry,
    pub(super) selector: &'a StyleSelector,
    cache: CascadeCache<'a>,
    /// `(owner instance, custom property)` pairs being substituted.
    in_progress: HashSet<(&'a InstanceId, String)>,
}

impl<'a> Resolution<'a> {
    pub fn new(
        model: &'a StyleObjectModel,
        registry: &'a PropertyRegistry,
        selector: &'a StyleSelector,
    ) -> Self {
        Self {
            model,
            registry,
            selector,
            cache: CascadeCache::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Resolve a property for the target instance.
    pub fn resolve(&mut self, property: &str) -> Result<ComputedStyleDecl> {
        let _span = tracing::debug_span!(
            "computed_style",
            instance = self.selector.target().map(InstanceId::as_str),
            property
        )
        .entered();

        let decl = self.computed(0, property)?;
        tracing::debug!(
            target: targets::CASCADE,
            used = %decl.used_value,
            source = ?decl.source,
            cached = self.cache.len(),
            "Resolved style"
        );
        Ok(decl)
    }

    /// Compute `property` at position `depth` of the instance selector.
    pub(super) fn computed(&mut self, depth: usize, property: &str) -> Result<ComputedStyleDecl> {
        let registry = self.registry;
        let info = registry.require(property)?;

        let Some(cascaded) = self.cascaded(depth, property) else {
            if info.inherited {
                if let Some(inherited) = self.inherited(depth, property)? {
                    return Ok(inherited);
                }
            }
            let used_value = self.current_color(depth, property, info.initial.clone())?;
            return Ok(ComputedStyleDecl {
                property: property.to_owned(),
                source: ValueSource::Default,
                cascaded_value: None,
                used_value,
            });
        };

        let value = cascaded.value();
        let used_value = self.specified(depth, property, info, value)?;
        Ok(ComputedStyleDecl {
            property: property.to_owned(),
            source: self.value_source(cascaded),
            cascaded_value: Some(value.clone()),
            used_value,
        })
    }

    /// The cascaded value at `depth`. States only apply to the target.
    pub(super) fn cascaded(&mut self, depth: usize, property: &str) -> Option<Cascaded<'a>> {
        let model = self.model;
        let selector = self.selector;
        let instance = selector.instance_selector.get(depth)?;
        self.cache.get_or_insert_with(depth, property, || {
            cascaded_with(
                model,
                instance.as_str(),
                property,
                &selector.matching_breakpoints,
                |state| depth == 0 && selector.matching_states.contains(state),
            )
        })
    }

    fn specified(
        &mut self,
        depth: usize,
        property: &str,
        info: &PropertyInfo,
        value: &StyleValue,
    ) -> Result<StyleValue> {
        if let Some(keyword) = value.css_wide_keyword() {
            return match keyword.for_property(info.inherited) {
                CssWideKeyword::Inherit => match self.inherited(depth, property)? {
                    Some(decl) => Ok(decl.used_value),
                    None => self.current_color(depth, property, info.initial.clone()),
                },
                CssWideKeyword::Initial | CssWideKeyword::Unset => {
                    self.current_color(depth, property, info.initial.clone())
                }
            };
        }

        if let StyleValue::Var { name, fallbacks } = value {
            let substituted = self.substitute_declared(depth, property, name, fallbacks)?;
            if substituted.is_invalid() {
                // Custom properties start out invalid; standard properties
                // behave as if they were never set.
                tracing::trace!(
                    target: targets::VARS,
                    property,
                    reference = %name,
                    "Unresolved reference, using initial value"
                );
                return self.current_color(depth, property, info.initial.clone());
            }
            if substituted.css_wide_keyword().is_some() {
                return self.specified(depth, property, info, &substituted);
            }
            return self.current_color(depth, property, substituted);
        }

        self.current_color(depth, property, value.clone())
    }

    /// Replace `currentcolor` with the instance's color.
    ///
    /// Custom properties keep the keyword. On `color` itself it takes the
    /// parent's color, like `inherit`.
    fn current_color(
        &mut self,
        depth: usize,
        property: &str,
        value: StyleValue,
    ) -> Result<StyleValue> {
        if !value.is_current_color() || is_custom_property(property) {
            return Ok(value);
        }
        if property == "color" {
            return match self.inherited(depth, "color")? {
                Some(decl) => Ok(decl.used_value),
                None => Ok(self.registry.require("color")?.initial.clone()),
            };
        }
        Ok(self.computed(depth, "color")?.used_value)
    }

    /// Substitute the `var()` a declaration of `property` at `depth` holds.
    fn substitute_declared(
        &mut self,
        depth: usize,
        property: &str,
        name: &str,
        fallbacks: &[StyleValue],
    ) -> Result<StyleValue> {
        // A custom property is in progress while its own reference resolves,
        // so `--a: var(--a)` stops at the first repeat.
        let selector = self.selector;
        let key = selector
            .instance_selector
            .get(depth)
            .filter(|_| is_custom_property(property))
            .map(|owner| (owner, property.to_owned()));
        let marked = match &key {
            Some(key) => self.in_progress.insert(key.clone()),
            None => false,
        };

        let substituted = self.substitute(depth, name, fallbacks);

        if let (true, Some(key)) = (marked, &key) {
            self.in_progress.remove(key);
        }
        substituted
    }

    /// Resolve `var(name, fallbacks...)` against the instance at `depth`.
    fn substitute(
        &mut self,
        depth: usize,
        name: &str,
        fallbacks: &[StyleValue],
    ) -> Result<StyleValue> {
        let value = self.custom_property(depth, name)?;
        if !value.is_invalid() {
            return Ok(value);
        }

        for fallback in fallbacks {
            let value = match fallback {
                StyleValue::Var { name, fallbacks } => self.substitute(depth, name, fallbacks)?,
                other => other.clone(),
            };
            if !value.is_invalid() {
                return Ok(value);
            }
        }
        Ok(StyleValue::Invalid)
    }

    /// Look up a custom property starting at the owner instance at `depth`.
    fn custom_property(&mut self, depth: usize, name: &str) -> Result<StyleValue> {
        let selector = self.selector;
        let Some(owner) = selector.instance_selector.get(depth) else {
            return Ok(StyleValue::Invalid);
        };
        if !is_custom_property(name) {
            return Ok(StyleValue::Invalid);
        }

        let key = (owner, name.to_owned());
        if self.in_progress.contains(&key) {
            tracing::warn!(
                target: targets::VARS,
                instance = %owner,
                property = name,
                "Custom property cycle"
            );
            return Ok(StyleValue::Invalid);
        }

        self.in_progress.insert(key.clone());
        let result = self.computed(depth, name);
        self.in_progress.remove(&key);

        let value = result?.used_value;
        tracing::trace!(
            target: targets::VARS,
            instance = %owner,
            property = name,
            value = %value,
            "Substituted custom property"
        );
        Ok(value)
    }

    fn value_source(&self, cascaded: Cascaded<'_>) -> ValueSource {
        match cascaded {
            Cascaded::Preset(_) => ValueSource::Preset,
            Cascaded::Declared(declaration) => {
                let id = &declaration.style_source_id;
                match self.model.style_source(id.as_str()).map(|s| s.kind) {
                    Some(StyleSourceKind::Token) => ValueSource::Token {
                        style_source_id: id.clone(),
                    },
                    _ => ValueSource::Local,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Breakpoint, Instance, StyleDeclaration, StyleSource};

    /// A chain `child -> parent`, each with one local source.
    fn chain() -> StyleObjectModel {
        let mut model = StyleObjectModel::new();
        model.add_breakpoint(Breakpoint::base("base"));
        for id in ["child", "parent"] {
            model.add_style_source(StyleSource::local(id));
            model.add_instance(Instance::new(id).with_style_sources([id]));
        }
        model
    }

    fn declare(model: &mut StyleObjectModel, instance: &str, property: &str, value: StyleValue) {
        model.set_declaration(StyleDeclaration::new(instance, "base", property, value));
    }

    fn used(model: &StyleObjectModel, instance: &str, property: &str) -> StyleValue {
        let path: &[&str] = match instance {
            "child" => &["child", "parent"],
            _ => &["parent"],
        };
        let selector = StyleSelector::new(path.iter().copied()).breakpoints(["base"]);
        get_computed_style_decl(model, &PropertyRegistry::builtin(), &selector, property)
            .unwrap()
            .used_value
    }

    #[test]
    fn self_reference_is_invalid() {
        let mut model = chain();
        declare(&mut model, "child", "--a", StyleValue::var("--a", vec![]));
        assert_eq!(used(&model, "child", "--a"), StyleValue::Invalid);
    }

    #[test]
    fn nested_fallbacks_resolve_left_to_right() {
        let mut model = chain();
        declare(&mut model, "child", "--b", StyleValue::keyword("green"));
        declare(
            &mut model,
            "child",
            "color",
            StyleValue::var(
                "--missing",
                vec![
                    StyleValue::var("--also-missing", vec![]),
                    StyleValue::var("--b", vec![]),
                    StyleValue::keyword("red"),
                ],
            ),
        );
        assert_eq!(used(&model, "child", "color"), StyleValue::keyword("green"));
    }

    #[test]
    fn fallback_after_cycle() {
        let mut model = chain();
        declare(&mut model, "child", "--a", StyleValue::var("--b", vec![]));
        declare(
            &mut model,
            "child",
            "--b",
            StyleValue::var("--a", vec![StyleValue::keyword("orange")]),
        );
        // --b falls back once --a turns out to be cyclic, which in turn
        // gives --a a value when queried through --b.
        assert_eq!(used(&model, "child", "--b"), StyleValue::keyword("orange"));
        assert_eq!(used(&model, "child", "--a"), StyleValue::keyword("orange"));
    }

    #[test]
    fn var_names_must_be_custom_properties() {
        let mut model = chain();
        declare(&mut model, "child", "color", StyleValue::var("width", vec![]));
        assert_eq!(used(&model, "child", "color"), StyleValue::keyword("black"));
    }

    #[test]
    fn custom_property_keeps_current_color() {
        let mut model = chain();
        declare(&mut model, "child", "color", StyleValue::keyword("blue"));
        declare(&mut model, "child", "--accent", StyleValue::keyword("currentColor"));
        declare(&mut model, "child", "outline-color", StyleValue::var("--accent", vec![]));

        assert_eq!(used(&model, "child", "--accent"), StyleValue::keyword("currentColor"));
        assert_eq!(used(&model, "child", "outline-color"), StyleValue::keyword("blue"));
    }

    #[test]
    fn inherited_custom_property_initial_is_invalid() {
        let mut model = chain();
        declare(&mut model, "parent", "--a", StyleValue::keyword("red"));
        declare(&mut model, "child", "--a", StyleValue::keyword("initial"));
        assert_eq!(used(&model, "child", "--a"), StyleValue::Invalid);

        declare(&mut model, "child", "--a", StyleValue::keyword("unset"));
        assert_eq!(used(&model, "child", "--a"), StyleValue::keyword("red"));
    }

    #[test]
    fn keyword_fallback_resolves_like_a_declared_keyword() {
        let mut model = chain();
        declare(&mut model, "parent", "color", StyleValue::keyword("red"));
        declare(
            &mut model,
            "child",
            "color",
            StyleValue::var("--missing", vec![StyleValue::keyword("inherit")]),
        );
        assert_eq!(used(&model, "child", "color"), StyleValue::keyword("red"));

        declare(
            &mut model,
            "child",
            "color",
            StyleValue::var("--missing", vec![StyleValue::keyword("initial")]),
        );
        assert_eq!(used(&model, "child", "color"), StyleValue::keyword("black"));
    }

    #[test]
    fn color_current_color_takes_parent_color() {
        let mut model = chain();
        declare(&mut model, "parent", "color", StyleValue::keyword("red"));
        declare(&mut model, "child", "color", StyleValue::keyword("currentcolor"));
        declare(&mut model, "child", "border-top-color", StyleValue::keyword("currentcolor"));

        assert_eq!(used(&model, "child", "color"), StyleValue::keyword("red"));
        assert_eq!(used(&model, "child", "border-top-color"), StyleValue::keyword("red"));
        // No parent: the initial color.
        declare(&mut model, "parent", "color", StyleValue::keyword("currentColor"));
        assert_eq!(used(&model, "parent", "color"), StyleValue::keyword("black"));
    }

    #[test]
    fn unknown_standard_property_is_an_error() {
        let model = chain();
        let selector = StyleSelector::new(["child", "parent"]).breakpoints(["base"]);
        let result =
            get_computed_style_decl(&model, &PropertyRegistry::builtin(), &selector, "colour");
        assert!(matches!(result, Err(crate::Error::UnknownProperty { .. })));
    }

    #[test]
    fn empty_selector_yields_initial() {
        let model = chain();
        let decl = get_computed_style_decl(
            &model,
            &PropertyRegistry::builtin(),
            &StyleSelector::default(),
            "width",
        )
        .unwrap();
        assert_eq!(decl.used_value, StyleValue::keyword("auto"));
        assert_eq!(decl.source, ValueSource::Default);
    }
}
