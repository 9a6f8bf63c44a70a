//! Style selectors: which instance, breakpoints and states a query targets.

use std::collections::HashSet;

use crate::model::{BreakpointId, InstanceId};

/// Describes where a property is being resolved.
///
/// `instance_selector` runs from the queried instance up to the root.
/// `matching_breakpoints` runs from the least to the most specific
/// breakpoint, the active one last. `matching_states` only ever apply to the
/// queried instance, never to its ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSelector {
    /// Instance chain, target first, root last.
    pub instance_selector: Vec<InstanceId>,
    /// Breakpoints in specificity order.
    pub matching_breakpoints: Vec<BreakpointId>,
    /// Active pseudo-states of the target, e.g. `:hover`.
    pub matching_states: HashSet<String>,
}

impl StyleSelector {
    /// Create a selector for an instance chain (target first).
    pub fn new<I, S>(instance_selector: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InstanceId>,
    {
        Self {
            instance_selector: instance_selector.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the matching breakpoints, least specific first.
    pub fn breakpoints<I, S>(mut self, breakpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BreakpointId>,
    {
        self.matching_breakpoints = breakpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the active pseudo-states of the target instance.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching_states = states.into_iter().map(Into::into).collect();
        self
    }

    /// The queried instance.
    pub fn target(&self) -> Option<&InstanceId> {
        self.instance_selector.first()
    }

    /// Strict ancestors of the target, nearest first.
    pub fn ancestors(&self) -> &[InstanceId] {
        self.instance_selector.get(1..).unwrap_or(&[])
    }
}
