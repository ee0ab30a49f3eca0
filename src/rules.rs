use crate::dsl::Expr;

/// An ordered rule base. Rules are checked against their variables when an
/// [`InferenceEngine`](crate::inference::InferenceEngine) is built.
#[derive(Clone, Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// `IF premise THEN consequence`. The consequence must be a single
    /// `variable.is(term)`.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule { premise, consequence });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> &Expr<T> {
        &self.consequence
    }
}
