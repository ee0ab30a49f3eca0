use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Defuzzified result for one output variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crisp {
    pub value: f64,
    /// No rule fired for this variable and `value` is the midpoint of its
    /// universe rather than a centroid.
    pub fallback: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Outputs {
    crisp: HashMap<VariableKey, Crisp>,
}

impl Outputs {
    pub(crate) fn new(crisp: HashMap<VariableKey, Crisp>) -> Self {
        Self { crisp }
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.crisp.get(&var.0).map(|c| c.value)
    }

    pub fn crisp<I>(&self, var: Variable<I>) -> Option<Crisp> {
        self.crisp.get(&var.0).copied()
    }

    pub fn used_fallback<I>(&self, var: Variable<I>) -> bool {
        self.crisp.get(&var.0).is_some_and(|c| c.fallback)
    }

    pub fn len(&self) -> usize {
        self.crisp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crisp.is_empty()
    }
}
