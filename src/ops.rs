use num::Float;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => u.min(v),
            Self::Prod => u * v,
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => u.max(v),
            Self::ProbOr => u + v - u * v,
        }
    }
}

/// Implication operator: shapes a consequent's membership `v` by the rule's
/// firing strength `u`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImplicationOp {
    /// Clip at the firing strength (Mamdani)
    #[default]
    Min,
    /// Scale by the firing strength (Larsen)
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => u.min(v),
            Self::Prod => u * v,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl ProductionLink {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => u.max(v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::one().min(u + v),
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Center of Gravity over the sample grid: `Σ u·μ(u) / Σ μ(u)`
    #[default]
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Collapses `membership` sampled at `universe` to one crisp value.
    ///
    /// Returns `None` when the set is empty (every degree is zero), leaving the
    /// fallback to the caller.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        let points = || universe.iter().copied().zip(membership.iter().copied());
        let total = points().fold(F::zero(), |acc, (_, m)| acc + m);

        if total.is_nan() || total <= F::zero() {
            return None;
        }

        match self {
            Self::Cog => {
                let moment = points().fold(F::zero(), |acc, (u, m)| acc + u * m);

                Some(moment / total)
            },
            Self::Boa => {
                let half = total / (F::one() + F::one());
                let mut cumulative = F::zero();

                points().find_map(|(u, m)| {
                    cumulative = cumulative + m;
                    (cumulative >= half).then_some(u)
                })
            },
            Self::Mom => {
                let maximum = points().fold(F::zero(), |acc, (_, m)| acc.max(m));
                let (count, sum) = points()
                    .filter(|(_, m)| *m == maximum)
                    .fold((F::zero(), F::zero()), |(n, sum), (u, _)| (n + F::one(), sum + u));

                Some(sum / count)
            },
            Self::Lom => {
                let maximum = points().fold(F::zero(), |acc, (_, m)| acc.max(m));
                points().filter(|(_, m)| *m == maximum).map(|(u, _)| u).last()
            },
            Self::Som => {
                let maximum = points().fold(F::zero(), |acc, (_, m)| acc.max(m));
                points().find(|(_, m)| *m == maximum).map(|(u, _)| u)
            },
        }
    }
}

/// The operator set an engine evaluates with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InferenceOps {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub imp_op: ImplicationOp,
    pub prod_link: ProductionLink,
    pub defuzz_op: DefuzzificationOp,
}

impl InferenceOps {
    /// Min for AND and implication, max for OR and aggregation, centroid
    /// defuzzification.
    pub fn mamdani() -> Self {
        Self {
            and_op: AndOp::Min,
            or_op: OrOp::Max,
            imp_op: ImplicationOp::Min,
            prod_link: ProductionLink::Max,
            defuzz_op: DefuzzificationOp::Cog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const UNIVERSE: [f64; 5] = [0., 1., 2., 3., 4.];

    #[test]
    fn test_binary_ops() {
        assert_relative_eq!(AndOp::Min.call(0.3, 0.8), 0.3);
        assert_relative_eq!(AndOp::Prod.call(0.5, 0.8), 0.4);
        assert_relative_eq!(OrOp::Max.call(0.3, 0.8), 0.8);
        assert_relative_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
        assert_relative_eq!(ImplicationOp::Min.call(0.4, 0.9), 0.4);
        assert_relative_eq!(ImplicationOp::Prod.call(0.5, 0.5), 0.25);
        assert_relative_eq!(ProductionLink::BoundedSum.call(0.7, 0.6), 1.);
    }

    #[test]
    fn test_cog() {
        let symmetric = [0., 0.5, 1., 0.5, 0.];
        assert_relative_eq!(DefuzzificationOp::Cog.call(&UNIVERSE, &symmetric).unwrap(), 2.);

        let skewed = [0., 0., 0., 1., 1.];
        assert_relative_eq!(DefuzzificationOp::Cog.call(&UNIVERSE, &skewed).unwrap(), 3.5);
    }

    #[test]
    fn test_maximum_methods() {
        let plateau = [0., 1., 1., 0.5, 0.];

        assert_relative_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &plateau).unwrap(), 1.5);
        assert_relative_eq!(DefuzzificationOp::Som.call(&UNIVERSE, &plateau).unwrap(), 1.);
        assert_relative_eq!(DefuzzificationOp::Lom.call(&UNIVERSE, &plateau).unwrap(), 2.);
    }

    #[test]
    fn test_boa() {
        let flat = [1., 1., 1., 1., 1.];
        assert_relative_eq!(DefuzzificationOp::Boa.call(&UNIVERSE, &flat).unwrap(), 2.);

        let right_heavy = [0., 0., 0., 0.2, 1.];
        assert_relative_eq!(DefuzzificationOp::Boa.call(&UNIVERSE, &right_heavy).unwrap(), 4.);
    }

    #[test]
    fn test_empty_set_has_no_crisp_value() {
        let empty = [0.; 5];

        for op in [
            DefuzzificationOp::Cog,
            DefuzzificationOp::Boa,
            DefuzzificationOp::Mom,
            DefuzzificationOp::Lom,
            DefuzzificationOp::Som,
        ] {
            assert_eq!(op.call(&UNIVERSE, &empty), None);
        }
    }

    #[test]
    fn test_mamdani_is_default() {
        assert_eq!(InferenceOps::mamdani(), InferenceOps::default());
    }
}
