use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp input values, one per input variable.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    /// Builder form of [`Inputs::add`].
    pub fn with<I>(mut self, var: Variable<I>, val: f64) -> Self {
        self.add(var, val);
        self
    }
}
