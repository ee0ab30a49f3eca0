use thiserror::Error;

/// Errors raised while building or evaluating a fuzzy system.
///
/// Everything except [`FuzzyError::MissingInput`] and
/// [`FuzzyError::NonFiniteInput`] is a configuration error and surfaces from
/// a builder, never from an evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("invalid membership function: {0}")]
    InvalidMembership(String),

    #[error("invalid universe of discourse for `{name}`: {reason}")]
    InvalidUniverse { name: String, reason: String },

    #[error("term `{0}` is defined twice")]
    DuplicateTerm(String),

    #[error("variable `{0}` has no terms")]
    EmptyTerms(String),

    #[error("rule base is empty")]
    EmptyRules,

    #[error("rule {rule} has an empty premise")]
    EmptyPremise { rule: usize },

    #[error("rule {rule} references a variable that is not part of this system")]
    UnknownVariable { rule: usize },

    #[error("rule {rule} references a term that variable `{variable}` does not define")]
    UnknownTerm { rule: usize, variable: String },

    #[error("rule {rule} consequent must be a single `variable is term` proposition")]
    CompoundConsequent { rule: usize },

    #[error("no input supplied for variable `{0}`")]
    MissingInput(String),

    #[error("input for variable `{0}` is NaN")]
    NonFiniteInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type FuzzyResult<T> = Result<T, FuzzyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FuzzyError::UnknownTerm {
            rule: 3,
            variable: "speed".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rule 3"));
        assert!(msg.contains("`speed`"));

        let err = FuzzyError::InvalidUniverse {
            name: "distance".to_string(),
            reason: "min must be below max".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid universe of discourse for `distance`: min must be below max"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err = FuzzyError::EmptyRules;
        let _: &dyn std::error::Error = &err;
    }
}
