//! Mamdani fuzzy inference with a brake controller on top.
//!
//! Variables are declared with closed label enums, rules are written with a
//! small DSL, and the finished [`InferenceEngine`] is immutable:
//!
//! ```
//! use fuzzy_brake::BrakeController;
//!
//! let controller = BrakeController::new()?;
//!
//! // Far enough away: no inference, no braking
//! assert_eq!(controller.compute_brake(100., 50.)?, (0., 100.));
//!
//! // Obstacle right ahead
//! let decision = controller.decide(10., 0.)?;
//! assert!(decision.pressure_percent > 80.);
//! assert!(decision.new_speed < 2.);
//! # Ok::<(), fuzzy_brake::FuzzyError>(())
//! ```

#![deny(clippy::unwrap_used)]

pub mod brake;
pub mod config;
mod dsl;
pub mod error;
pub mod inference;
mod inputs;
mod linspace;
mod math;
pub mod membership;
pub mod ops;
mod outputs;
mod rules;
pub mod terms;
pub mod variable;

pub use brake::{BrakeController, BrakeDecision, BrakeTerm, Distance, Pressure, Speed};
pub use config::{BrakeConfig, FallbackPolicy};
pub use dsl::Expr;
pub use error::{FuzzyError, FuzzyResult};
pub use inference::InferenceEngine;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::MembershipFunction;
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, InferenceOps, OrOp, ProductionLink};
pub use outputs::{Crisp, Outputs};
pub use rules::{Rule, Rules};
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, Variable, VariableKey, Variables};
