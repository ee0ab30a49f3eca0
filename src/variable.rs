use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;
use crate::membership::MembershipFunction;
use crate::terms::{Term, Terms};

/// Sample spacing used when a variable is added without an explicit step.
pub const DEFAULT_STEP: f64 = 1.0;

/// Upper bound on the number of samples in a variable's grid.
pub const MAX_SAMPLES: usize = 1_000_000;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose labels are the enum `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

/// The linguistic variables of one fuzzy system, keyed by slot.
///
/// `T` is the system's union of label enums; each variable's own label enum
/// converts into it.
#[derive(Debug)]
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self(SlotMap::with_key())
    }
}

impl<T: Copy + PartialEq> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// If the step value is not provided, it defaults to [`DEFAULT_STEP`]
    pub fn add<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> FuzzyResult<Variable<I>> {
        let terms = terms.0.iter().map(|(label, mf)| (label.into(), mf.clone())).collect();
        let variable = LinguisticVariable::new(name, universe_range, terms, step.unwrap_or(DEFAULT_STEP))?;
        let key = self.0.insert(variable);

        Ok(Variable(key, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.0.get(var.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named variable with a bounded universe and labelled fuzzy sets over it.
///
/// The universe is fixed at construction. The sample grid is only used on the
/// output side, for aggregation and defuzzification.
#[derive(Clone, Debug)]
pub struct LinguisticVariable<T> {
    name: String,
    min_u: f64,
    max_u: f64,
    samples: Vec<f64>,
    terms: Vec<(T, MembershipFunction)>,
}

impl<T: Copy + PartialEq> LinguisticVariable<T> {
    fn new(
        name: &str,
        universe_range: RangeInclusive<f64>,
        terms: Vec<(T, MembershipFunction)>,
        step: f64,
    ) -> FuzzyResult<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();
        let invalid = |reason: &str| FuzzyError::InvalidUniverse {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if !min_u.is_finite() || !max_u.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if min_u >= max_u {
            return Err(invalid("min must be below max"));
        }
        if !step.is_finite() || step <= 0. {
            return Err(invalid("sample step must be positive"));
        }
        if (max_u - min_u) / step >= MAX_SAMPLES as f64 {
            return Err(invalid("sample step too small for the universe"));
        }
        if terms.is_empty() {
            return Err(FuzzyError::EmptyTerms(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            min_u,
            max_u,
            samples: Linspace::with_step(min_u, max_u, step).collect(),
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn midpoint(&self) -> f64 {
        self.min_u + (self.max_u - self.min_u) / 2.
    }

    pub fn sample_points(&self) -> &[f64] {
        &self.samples
    }

    pub fn terms(&self) -> impl Iterator<Item = (T, &MembershipFunction)> {
        self.terms.iter().map(|(term, mf)| (*term, mf))
    }

    pub fn membership(&self, term: T) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(t, _)| *t == term).map(|(_, mf)| mf)
    }

    /// Clamps `x` into the universe. NaN passes through unchanged.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min_u, self.max_u)
    }

    /// Degree of every label at `x`, after clamping `x` into the universe.
    pub fn fuzzify(&self, x: f64) -> Vec<(T, f64)> {
        let x = self.clamp(x);

        self.terms.iter().map(|(term, mf)| (*term, mf.degree(x))).collect()
    }

    /// Degree of a single label at `x`, after clamping `x` into the universe.
    pub fn degree(&self, term: T, x: f64) -> Option<f64> {
        self.membership(term).map(|mf| mf.degree(self.clamp(x)))
    }
}
