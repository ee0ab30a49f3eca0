use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dsl::Expr;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::ops::InferenceOps;
use crate::outputs::{Crisp, Outputs};
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Variable, VariableKey, Variables};

/// A validated fuzzy system: variables, rules and the operators to run them
/// with.
///
/// Immutable once built. Every evaluation works on its own buffers, so one
/// engine can be shared by reference across threads and calls.
#[derive(Debug)]
pub struct InferenceEngine<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    ops: InferenceOps,
    inputs: Vec<VariableKey>,
    outputs: Vec<VariableKey>,
    consequents: Vec<(VariableKey, T)>,
}

impl<T: Copy + PartialEq> InferenceEngine<T> {
    /// Checks every rule against `vars` and freezes the system.
    pub fn new(vars: Variables<T>, rules: Rules<T>, ops: InferenceOps) -> FuzzyResult<Self> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRules);
        }

        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut consequents = Vec::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            let premise = rule.premise.propositions();

            if premise.is_empty() {
                return Err(FuzzyError::EmptyPremise { rule: i });
            }

            for (var_key, term) in premise {
                check_proposition(&vars, i, var_key, *term)?;

                if !inputs.contains(&var_key) {
                    inputs.push(var_key);
                }
            }

            let Expr::Is(var_key, term) = rule.consequence else {
                return Err(FuzzyError::CompoundConsequent { rule: i });
            };

            check_proposition(&vars, i, var_key, term)?;

            if !outputs.contains(&var_key) {
                outputs.push(var_key);
            }
            consequents.push((var_key, term));
        }

        debug!(
            variables = vars.len(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            rules = rules.len(),
            "built fuzzy inference engine"
        );

        Ok(Self {
            vars,
            rules,
            ops,
            inputs,
            outputs,
            consequents,
        })
    }

    /// [`InferenceEngine::new`] with [`InferenceOps::mamdani`].
    pub fn mamdani(vars: Variables<T>, rules: Rules<T>) -> FuzzyResult<Self> {
        Self::new(vars, rules, InferenceOps::mamdani())
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn ops(&self) -> InferenceOps {
        self.ops
    }

    /// Firing strength of every rule, in rule order.
    pub fn firing_strengths(&self, inputs: &Inputs) -> FuzzyResult<Vec<f64>> {
        let facts = self.fuzzify(inputs)?;

        let strengths = self
            .rules
            .iter()
            .map(|rule| strength(&rule.premise, &facts, self.ops))
            .collect::<Vec<_>>();

        for (i, w) in strengths.iter().enumerate() {
            trace!(rule = i, strength = *w, "rule firing strength");
        }

        Ok(strengths)
    }

    /// The aggregated output fuzzy set of `output`, one degree per sample
    /// point. `None` if `output` is not a consequent of any rule.
    pub fn aggregate<I>(&self, inputs: &Inputs, output: Variable<I>) -> FuzzyResult<Option<Vec<f64>>> {
        if !self.outputs.contains(&output.0) {
            return Ok(None);
        }

        let strengths = self.firing_strengths(inputs)?;
        let labels = self.label_strengths(&strengths);

        Ok(Some(self.aggregated(output.0, &labels)))
    }

    /// Fuzzify, fire, aggregate and defuzzify every output variable.
    pub fn eval(&self, inputs: &Inputs) -> FuzzyResult<Outputs> {
        let strengths = self.firing_strengths(inputs)?;
        let labels = self.label_strengths(&strengths);
        let mut crisp = HashMap::with_capacity(self.outputs.len());

        for &var_key in &self.outputs {
            // Keys were checked against `vars` in `new` and `vars` never changes
            let var = &self.vars.0[var_key];
            let aggregated = self.aggregated(var_key, &labels);

            let value = match self.ops.defuzz_op.call(var.sample_points(), &aggregated) {
                Some(value) => Crisp { value, fallback: false },
                None => {
                    debug!(
                        variable = var.name(),
                        midpoint = var.midpoint(),
                        "no rule fired, using universe midpoint"
                    );
                    Crisp {
                        value: var.midpoint(),
                        fallback: true,
                    }
                },
            };

            crisp.insert(var_key, value);
        }

        Ok(Outputs::new(crisp))
    }

    fn fuzzify(&self, inputs: &Inputs) -> FuzzyResult<HashMap<VariableKey, Vec<(T, f64)>>> {
        let mut facts = HashMap::with_capacity(self.inputs.len());

        for &var_key in &self.inputs {
            let var = &self.vars.0[var_key];
            let value = *inputs
                .0
                .get(&var_key)
                .ok_or_else(|| FuzzyError::MissingInput(var.name().to_string()))?;

            if value.is_nan() {
                return Err(FuzzyError::NonFiniteInput(var.name().to_string()));
            }

            facts.insert(var_key, var.fuzzify(value));
        }

        Ok(facts)
    }

    /// Merges the strengths of rules that share a consequent label.
    fn label_strengths(&self, strengths: &[f64]) -> Vec<(VariableKey, T, f64)> {
        let mut labels: Vec<(VariableKey, T, f64)> = Vec::with_capacity(self.consequents.len());

        for (&(var_key, term), &w) in self.consequents.iter().zip(strengths) {
            match labels.iter_mut().find(|(k, t, _)| *k == var_key && *t == term) {
                Some((_, _, merged)) => *merged = self.ops.or_op.call(*merged, w),
                None => labels.push((var_key, term, w)),
            }
        }

        labels
    }

    fn aggregated(&self, var_key: VariableKey, labels: &[(VariableKey, T, f64)]) -> Vec<f64> {
        let var: &LinguisticVariable<T> = &self.vars.0[var_key];
        let clipped: Vec<_> = labels
            .iter()
            .filter(|(k, _, _)| *k == var_key)
            .filter_map(|(_, term, w)| var.membership(*term).map(|mf| (mf, *w)))
            .collect();

        var.sample_points()
            .iter()
            .map(|&s| {
                clipped.iter().fold(0., |acc, (mf, w)| {
                    self.ops.prod_link.call(acc, self.ops.imp_op.call(*w, mf.degree(s)))
                })
            })
            .collect()
    }
}

fn check_proposition<T: Copy + PartialEq>(
    vars: &Variables<T>,
    rule: usize,
    var_key: VariableKey,
    term: T,
) -> FuzzyResult<()> {
    let var = vars.0.get(var_key).ok_or(FuzzyError::UnknownVariable { rule })?;

    if var.membership(term).is_none() {
        return Err(FuzzyError::UnknownTerm {
            rule,
            variable: var.name().to_string(),
        });
    }

    Ok(())
}

fn strength<T: Copy + PartialEq>(
    expr: &Expr<T>,
    facts: &HashMap<VariableKey, Vec<(T, f64)>>,
    ops: InferenceOps,
) -> f64 {
    match expr {
        Expr::Is(var_key, term) => facts
            .get(var_key)
            .and_then(|degrees| degrees.iter().find(|(t, _)| t == term))
            .map_or(0., |(_, degree)| *degree),
        Expr::And(exprs) => exprs
            .iter()
            .fold(1., |acc, expr| ops.and_op.call(acc, strength(expr, facts, ops))),
        Expr::Or(exprs) => exprs
            .iter()
            .fold(0., |acc, expr| ops.or_op.call(acc, strength(expr, facts, ops))),
    }
}
