//! Membership functions for fuzzy sets.

use crate::error::{FuzzyError, FuzzyResult};
use crate::math::interp;

/// Shape of a fuzzy set over a variable's universe.
///
/// Every shape is total: [`MembershipFunction::degree`] accepts any `f64` and
/// returns a value in `[0, 1]`, with zero outside the shape's support.
#[derive(Clone, Debug, PartialEq)]
pub enum MembershipFunction {
    /// Rises from `a` to a peak at `b`, falls back to zero at `c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises from `a` to `b`, flat at one on `[b, c]`, falls to zero at `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Linear interpolation through `(x, degree)` points sorted by `x`.
    Piecewise(Vec<(f64, f64)>),
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        let mf = Self::Triangular { a, b, c };
        mf.validate()?;
        Ok(mf)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        let mf = Self::Trapezoidal { a, b, c, d };
        mf.validate()?;
        Ok(mf)
    }

    pub fn piecewise(points: impl Into<Vec<(f64, f64)>>) -> FuzzyResult<Self> {
        let mf = Self::Piecewise(points.into());
        mf.validate()?;
        Ok(mf)
    }

    /// Checks that control points are finite and non-decreasing.
    pub fn validate(&self) -> FuzzyResult<()> {
        match self {
            Self::Triangular { a, b, c } => check_ordered(&[*a, *b, *c]),
            Self::Trapezoidal { a, b, c, d } => check_ordered(&[*a, *b, *c, *d]),
            Self::Piecewise(points) => {
                if points.len() < 2 {
                    return Err(FuzzyError::InvalidMembership(format!(
                        "piecewise membership needs at least two points, got {}",
                        points.len()
                    )));
                }
                if let Some((_, y)) = points.iter().find(|(_, y)| !(0.0..=1.0).contains(y)) {
                    return Err(FuzzyError::InvalidMembership(format!(
                        "piecewise degree {y} is outside [0, 1]"
                    )));
                }
                let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
                check_ordered(&xs)
            },
        }
    }

    /// Degree of membership of `x` in this set.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        let degree = match self {
            Self::Triangular { a, b, c } => interp(x, &[(*a, 0.), (*b, 1.), (*c, 0.)]),
            Self::Trapezoidal { a, b, c, d } => interp(x, &[(*a, 0.), (*b, 1.), (*c, 1.), (*d, 0.)]),
            Self::Piecewise(points) => interp(x, points),
        };

        degree.clamp(0., 1.)
    }

    /// Closed interval outside of which the degree is zero.
    ///
    /// For piecewise shapes whose end points are non-zero this is unbounded on
    /// that side.
    pub fn support(&self) -> (f64, f64) {
        match self {
            Self::Triangular { a, c, .. } => (*a, *c),
            Self::Trapezoidal { a, d, .. } => (*a, *d),
            Self::Piecewise(points) => {
                let lo = match points.first() {
                    Some(&(x, y)) if y <= 0. => x,
                    _ => f64::NEG_INFINITY,
                };
                let hi = match points.last() {
                    Some(&(x, y)) if y <= 0. => x,
                    _ => f64::INFINITY,
                };
                (lo, hi)
            },
        }
    }
}

fn check_ordered(points: &[f64]) -> FuzzyResult<()> {
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(FuzzyError::InvalidMembership(format!(
            "control point {p} is not finite"
        )));
    }
    if points.windows(2).any(|w| matches!(w, [l, r] if l > r)) {
        return Err(FuzzyError::InvalidMembership(format!(
            "control points {points:?} are not non-decreasing"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangular_membership() {
        let mf = MembershipFunction::triangular(5., 15., 25.).unwrap();

        assert_relative_eq!(mf.degree(-100.), 0.);
        assert_relative_eq!(mf.degree(5.), 0.);
        assert_relative_eq!(mf.degree(10.), 0.5);
        assert_relative_eq!(mf.degree(15.), 1.);
        assert_relative_eq!(mf.degree(22.5), 0.25);
        assert_relative_eq!(mf.degree(25.), 0.);
        assert_relative_eq!(mf.degree(1e12), 0.);
    }

    #[test]
    fn test_triangular_shoulders() {
        let left = MembershipFunction::triangular(0., 0., 10.).unwrap();
        assert_relative_eq!(left.degree(0.), 1.);
        assert_relative_eq!(left.degree(2.), 0.8);
        assert_relative_eq!(left.degree(-0.1), 0.);

        let right = MembershipFunction::triangular(60., 100., 100.).unwrap();
        assert_relative_eq!(right.degree(80.), 0.5);
        assert_relative_eq!(right.degree(100.), 1.);
        assert_relative_eq!(right.degree(100.1), 0.);
    }

    #[test]
    fn test_trapezoidal_membership() {
        let mf = MembershipFunction::trapezoidal(20., 30., 45., 55.).unwrap();

        assert_relative_eq!(mf.degree(-1.), 0.);
        assert_relative_eq!(mf.degree(20.), 0.);
        assert_relative_eq!(mf.degree(25.), 0.5);
        assert_relative_eq!(mf.degree(30.), 1.);
        assert_relative_eq!(mf.degree(40.), 1.);
        assert_relative_eq!(mf.degree(45.), 1.);
        assert_relative_eq!(mf.degree(52.), 0.3, epsilon = 1e-12);
        assert_relative_eq!(mf.degree(55.), 0.);

        let shoulder = MembershipFunction::trapezoidal(0., 0., 20., 30.).unwrap();
        assert_relative_eq!(shoulder.degree(0.), 1.);
        assert_relative_eq!(shoulder.degree(20.), 1.);
        assert_relative_eq!(shoulder.degree(25.), 0.5);
    }

    #[test]
    fn test_piecewise_membership() {
        let mf = MembershipFunction::piecewise(vec![(2., 1.), (3., 0.7), (4., 0.3), (5., 0.)]).unwrap();

        assert_relative_eq!(mf.degree(0.), 1.);
        assert_relative_eq!(mf.degree(3.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(mf.degree(9.), 0.);
        assert_eq!(mf.support(), (f64::NEG_INFINITY, 5.));
    }

    #[test]
    fn test_nan_has_no_membership() {
        let mf = MembershipFunction::piecewise(vec![(0., 1.), (1., 1.)]).unwrap();
        assert_relative_eq!(mf.degree(f64::NAN), 0.);
    }

    #[test]
    fn test_malformed_control_points() {
        assert!(matches!(
            MembershipFunction::triangular(10., 5., 20.),
            Err(FuzzyError::InvalidMembership(_))
        ));
        assert!(matches!(
            MembershipFunction::trapezoidal(0., 10., 5., 20.),
            Err(FuzzyError::InvalidMembership(_))
        ));
        assert!(matches!(
            MembershipFunction::triangular(0., f64::NAN, 1.),
            Err(FuzzyError::InvalidMembership(_))
        ));
        assert!(matches!(
            MembershipFunction::piecewise(vec![(0., 0.5)]),
            Err(FuzzyError::InvalidMembership(_))
        ));
        assert!(matches!(
            MembershipFunction::piecewise(vec![(0., 0.), (1., 1.5)]),
            Err(FuzzyError::InvalidMembership(_))
        ));
    }
}
