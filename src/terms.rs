use std::fmt::Debug;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::MembershipFunction;

/// The labelled fuzzy sets of one linguistic variable.
///
/// Labels are a closed enum deriving [`Key`], so a variable can only ever be
/// asked about labels it was declared with.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFunction>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Term + Debug> Terms<K> {
    /// Adds `label` with shape `membership`, rejecting repeated labels and
    /// malformed shapes.
    pub fn insert(&mut self, label: K, membership: MembershipFunction) -> FuzzyResult<()> {
        membership.validate()?;

        if self.0.contains_key(label) {
            return Err(FuzzyError::DuplicateTerm(format!("{label:?}")));
        }

        self.0.insert(label, membership);

        Ok(())
    }

    /// Builder form of [`Terms::insert`].
    pub fn with(mut self, label: K, membership: MembershipFunction) -> FuzzyResult<Self> {
        self.insert(label, membership)?;
        Ok(self)
    }
}
