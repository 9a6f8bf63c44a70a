//! Cascade: picking the winning declaration of an instance.

use std::collections::HashSet;

use crate::logging::targets;
use crate::model::{BreakpointId, StyleDeclaration, StyleObjectModel};
use crate::types::StyleValue;

/// Rank of a candidate declaration; the greatest rank wins.
///
/// Fields compare in declaration order: a matching state beats any stateless
/// value, then the more specific breakpoint wins, then the later style
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CascadeRank {
    /// 1 when the declaration's state matches, 0 when it has no state.
    pub state: u8,
    /// Index of the breakpoint in the matching breakpoints.
    pub breakpoint: usize,
    /// Index of the style source in the instance's attached sources.
    pub source: usize,
}

/// Outcome of the cascade for one instance and property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cascaded<'a> {
    /// A declaration of one of the instance's style sources won.
    Declared(&'a StyleDeclaration),
    /// No declaration matched; the component preset applies.
    Preset(&'a StyleValue),
}

impl<'a> Cascaded<'a> {
    /// The cascaded value.
    pub fn value(&self) -> &'a StyleValue {
        match self {
            Cascaded::Declared(declaration) => &declaration.value,
            Cascaded::Preset(value) => value,
        }
    }
}

/// Find the declaration that wins the cascade for `property` on one
/// instance.
///
/// Only the instance's own style sources are considered: no inheritance,
/// keyword or `var()` interpretation. Declarations at breakpoints outside
/// `matching_breakpoints` or with a state outside `matching_states` never
/// win.
pub fn resolve_own_value<'a>(
    model: &'a StyleObjectModel,
    instance_id: &str,
    property: &str,
    matching_breakpoints: &[BreakpointId],
    matching_states: &HashSet<String>,
) -> Option<&'a StyleDeclaration> {
    cascade_winner(model, instance_id, property, matching_breakpoints, |state| {
        matching_states.contains(state)
    })
}

/// Like [`resolve_own_value`], falling back to the instance component's
/// preset value when no declaration matches.
pub fn resolve_cascaded_value<'a>(
    model: &'a StyleObjectModel,
    instance_id: &str,
    property: &str,
    matching_breakpoints: &[BreakpointId],
    matching_states: &HashSet<String>,
) -> Option<Cascaded<'a>> {
    cascaded_with(model, instance_id, property, matching_breakpoints, |state| {
        matching_states.contains(state)
    })
}

pub(crate) fn cascaded_with<'a>(
    model: &'a StyleObjectModel,
    instance_id: &str,
    property: &str,
    matching_breakpoints: &[BreakpointId],
    state_matches: impl Fn(&str) -> bool,
) -> Option<Cascaded<'a>> {
    cascade_winner(model, instance_id, property, matching_breakpoints, state_matches)
        .map(Cascaded::Declared)
        .or_else(|| model.preset_style(instance_id, property).map(Cascaded::Preset))
}

fn cascade_winner<'a>(
    model: &'a StyleObjectModel,
    instance_id: &str,
    property: &str,
    matching_breakpoints: &[BreakpointId],
    state_matches: impl Fn(&str) -> bool,
) -> Option<&'a StyleDeclaration> {
    let mut winner: Option<(CascadeRank, &StyleDeclaration)> = None;

    for (source, style_source_id) in model.style_sources_for(instance_id).iter().enumerate() {
        for declaration in model.declarations(style_source_id.as_str(), property) {
            let Some(breakpoint) = matching_breakpoints
                .iter()
                .position(|id| *id == declaration.breakpoint_id)
            else {
                continue;
            };
            let state = match declaration.state.as_deref() {
                None => 0,
                Some(state) if state_matches(state) => 1,
                Some(_) => continue,
            };

            let rank = CascadeRank {
                state,
                breakpoint,
                source,
            };
            // Equal ranks go to the later declaration.
            if winner.is_none_or(|(best, _)| rank >= best) {
                winner = Some((rank, declaration));
            }
        }
    }

    if let Some((rank, declaration)) = winner {
        tracing::trace!(
            target: targets::CASCADE,
            instance = instance_id,
            property,
            source = %declaration.style_source_id,
            breakpoint = %declaration.breakpoint_id,
            ?rank,
            "Cascade winner"
        );
    }
    winner.map(|(_, declaration)| declaration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Instance, StyleSource};

    fn breakpoints(ids: &[&str]) -> Vec<BreakpointId> {
        ids.iter().map(|id| BreakpointId::new(*id)).collect()
    }

    fn model_with_sources(sources: &[&str]) -> StyleObjectModel {
        let mut model = StyleObjectModel::new();
        for id in sources {
            model.add_style_source(StyleSource::local(*id));
        }
        model.add_instance(Instance::new("box").with_style_sources(sources.iter().copied()));
        model
    }

    fn width(source: &str, breakpoint: &str, px: f64) -> StyleDeclaration {
        StyleDeclaration::new(source, breakpoint, "width", StyleValue::px(px))
    }

    #[test]
    fn rank_orders_state_then_breakpoint_then_source() {
        let stateless_large = CascadeRank {
            state: 0,
            breakpoint: 2,
            source: 1,
        };
        let hover_base = CascadeRank {
            state: 1,
            breakpoint: 0,
            source: 0,
        };
        let later_source = CascadeRank {
            state: 0,
            breakpoint: 2,
            source: 2,
        };
        assert!(hover_base > stateless_large);
        assert!(later_source > stateless_large);
    }

    #[test]
    fn later_breakpoint_wins() {
        let mut model = model_with_sources(&["local"]);
        model.set_declaration(width("local", "base", 10.0));
        model.set_declaration(width("local", "small", 20.0));
        model.set_declaration(width("local", "large", 30.0));
        let states = HashSet::new();

        let all = breakpoints(&["base", "small", "large"]);
        let winner = resolve_own_value(&model, "box", "width", &all, &states).unwrap();
        assert_eq!(winner.value, StyleValue::px(30.0));

        let narrow = breakpoints(&["base", "small"]);
        let winner = resolve_own_value(&model, "box", "width", &narrow, &states).unwrap();
        assert_eq!(winner.value, StyleValue::px(20.0));
    }

    #[test]
    fn later_source_wins_at_same_breakpoint() {
        let mut model = model_with_sources(&["token", "local"]);
        model.set_declaration(width("local", "base", 2.0));
        model.set_declaration(width("token", "base", 1.0));

        let winner =
            resolve_own_value(&model, "box", "width", &breakpoints(&["base"]), &HashSet::new())
                .unwrap();
        assert_eq!(winner.style_source_id.as_str(), "local");
    }

    #[test]
    fn breakpoint_beats_source_order() {
        let mut model = model_with_sources(&["token", "local"]);
        model.set_declaration(width("token", "small", 1.0));
        model.set_declaration(width("local", "base", 2.0));

        let winner = resolve_own_value(
            &model,
            "box",
            "width",
            &breakpoints(&["base", "small"]),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(winner.value, StyleValue::px(1.0));
    }

    #[test]
    fn unmatched_states_are_excluded() {
        let mut model = model_with_sources(&["local"]);
        model.set_declaration(width("local", "base", 5.0).with_state(":focus"));

        let bps = breakpoints(&["base"]);
        let hover: HashSet<String> = [":hover".to_string()].into();
        assert!(resolve_own_value(&model, "box", "width", &bps, &hover).is_none());

        let focus: HashSet<String> = [":focus".to_string()].into();
        assert!(resolve_own_value(&model, "box", "width", &bps, &focus).is_some());
    }

    #[test]
    fn unmatched_breakpoints_are_excluded() {
        let mut model = model_with_sources(&["local"]);
        model.set_declaration(width("local", "large", 5.0));

        let winner =
            resolve_own_value(&model, "box", "width", &breakpoints(&["base"]), &HashSet::new());
        assert!(winner.is_none());
    }

    #[test]
    fn preset_only_when_nothing_declared() {
        let mut model = model_with_sources(&["local"]);
        model.add_instance(
            Instance::new("box")
                .with_style_sources(["local"])
                .with_component("Box"),
        );
        model.set_preset_style("Box", "width", StyleValue::px(100.0));
        let bps = breakpoints(&["base"]);
        let states = HashSet::new();

        let cascaded = resolve_cascaded_value(&model, "box", "width", &bps, &states).unwrap();
        assert!(matches!(cascaded, Cascaded::Preset(_)));
        assert_eq!(cascaded.value(), &StyleValue::px(100.0));

        model.set_declaration(width("local", "base", 1.0));
        let cascaded = resolve_cascaded_value(&model, "box", "width", &bps, &states).unwrap();
        assert!(matches!(cascaded, Cascaded::Declared(_)));
        assert_eq!(cascaded.value(), &StyleValue::px(1.0));
    }
}
