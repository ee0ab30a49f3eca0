//! Brake pressure from relative speed and obstacle distance.
//!
//! Four speed labels and four distance labels feed twelve Mamdani rules whose
//! consequents are four brake pressure labels. The engine is built once per
//! [`BrakeController`] and shared by every call.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{BrakeConfig, FallbackPolicy};
use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::membership::MembershipFunction;
use crate::rules::Rules;
use crate::terms::{Key, Terms};
use crate::variable::{Variable, Variables};

pub const SPEED_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const DISTANCE_RANGE: RangeInclusive<f64> = 0.0..=50.0;
pub const PRESSURE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Speed {
    VerySlow,
    Slow,
    Fast,
    VeryFast,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Distance {
    VeryClose,
    Close,
    Far,
    VeryFar,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Pressure {
    VeryLow,
    Low,
    High,
    VeryHigh,
}

/// Every label of the brake system.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BrakeTerm {
    Speed(Speed),
    Distance(Distance),
    Pressure(Pressure),
}

impl From<Speed> for BrakeTerm {
    fn from(s: Speed) -> Self {
        Self::Speed(s)
    }
}

impl From<Distance> for BrakeTerm {
    fn from(d: Distance) -> Self {
        Self::Distance(d)
    }
}

impl From<Pressure> for BrakeTerm {
    fn from(p: Pressure) -> Self {
        Self::Pressure(p)
    }
}

/// `(distance, speed) -> pressure`. Far & very slow and very far at anything
/// below very fast have no rule.
pub const RULE_TABLE: [(Distance, Speed, Pressure); 12] = [
    (Distance::VeryClose, Speed::VerySlow, Pressure::VeryHigh),
    (Distance::Close, Speed::VerySlow, Pressure::VeryLow),
    (Distance::VeryClose, Speed::Slow, Pressure::VeryHigh),
    (Distance::Close, Speed::Slow, Pressure::Low),
    (Distance::Far, Speed::Slow, Pressure::VeryLow),
    (Distance::VeryClose, Speed::Fast, Pressure::VeryHigh),
    (Distance::Close, Speed::Fast, Pressure::Low),
    (Distance::Far, Speed::Fast, Pressure::VeryLow),
    (Distance::VeryClose, Speed::VeryFast, Pressure::VeryHigh),
    (Distance::Close, Speed::VeryFast, Pressure::High),
    (Distance::Far, Speed::VeryFast, Pressure::Low),
    (Distance::VeryFar, Speed::VeryFast, Pressure::VeryLow),
];

fn speed_terms() -> FuzzyResult<Terms<Speed>> {
    Terms::new()
        .with(Speed::VerySlow, MembershipFunction::trapezoidal(0., 0., 20., 30.)?)?
        .with(Speed::Slow, MembershipFunction::trapezoidal(20., 30., 45., 55.)?)?
        .with(Speed::Fast, MembershipFunction::trapezoidal(45., 55., 70., 80.)?)?
        .with(Speed::VeryFast, MembershipFunction::trapezoidal(70., 80., 100., 100.)?)
}

fn distance_terms() -> FuzzyResult<Terms<Distance>> {
    Terms::new()
        .with(Distance::VeryClose, MembershipFunction::triangular(0., 0., 10.)?)?
        .with(Distance::Close, MembershipFunction::triangular(5., 15., 25.)?)?
        .with(Distance::Far, MembershipFunction::triangular(20., 30., 40.)?)?
        .with(Distance::VeryFar, MembershipFunction::triangular(35., 50., 50.)?)
}

fn pressure_terms() -> FuzzyResult<Terms<Pressure>> {
    Terms::new()
        .with(Pressure::VeryLow, MembershipFunction::triangular(0., 20., 40.)?)?
        .with(Pressure::Low, MembershipFunction::triangular(20., 40., 60.)?)?
        .with(Pressure::High, MembershipFunction::triangular(40., 60., 80.)?)?
        .with(Pressure::VeryHigh, MembershipFunction::triangular(60., 100., 100.)?)
}

/// Outcome of one braking decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakeDecision {
    /// Brake pressure in `[0, 100]` percent
    pub pressure_percent: f64,
    /// Speed after braking, in `[0, speed]`
    pub new_speed: f64,
}

impl BrakeDecision {
    /// True when any pressure is applied. Both the shortcut and the
    /// `NoBraking` fallback report false.
    pub fn braking_required(&self) -> bool {
        self.pressure_percent > 0.
    }
}

/// Speed/distance brake controller over an immutable fuzzy engine.
#[derive(Debug)]
pub struct BrakeController {
    engine: InferenceEngine<BrakeTerm>,
    speed: Variable<Speed>,
    distance: Variable<Distance>,
    pressure: Variable<Pressure>,
    config: BrakeConfig,
}

impl BrakeController {
    pub fn new() -> FuzzyResult<Self> {
        Self::with_config(BrakeConfig::default())
    }

    pub fn with_config(config: BrakeConfig) -> FuzzyResult<Self> {
        config.validate()?;

        let mut vars = Variables::<BrakeTerm>::new();
        let speed = vars.add("speed", SPEED_RANGE, speed_terms()?, None)?;
        let distance = vars.add("distance", DISTANCE_RANGE, distance_terms()?, None)?;
        let pressure = vars.add(
            "brake_pressure",
            PRESSURE_RANGE,
            pressure_terms()?,
            Some(config.sample_step),
        )?;

        let mut rules = Rules::<BrakeTerm>::with_capacity(RULE_TABLE.len());
        for (d, s, p) in RULE_TABLE {
            rules.add(distance.is(d).and(speed.is(s)), pressure.is(p));
        }

        Ok(Self {
            engine: InferenceEngine::mamdani(vars, rules)?,
            speed,
            distance,
            pressure,
            config,
        })
    }

    pub fn engine(&self) -> &InferenceEngine<BrakeTerm> {
        &self.engine
    }

    pub fn config(&self) -> &BrakeConfig {
        &self.config
    }

    pub fn speed(&self) -> Variable<Speed> {
        self.speed
    }

    pub fn distance(&self) -> Variable<Distance> {
        self.distance
    }

    pub fn pressure(&self) -> Variable<Pressure> {
        self.pressure
    }

    /// Brake pressure and resulting speed for `speed` (km/h) and `distance`
    /// (m).
    ///
    /// Inputs are clamped into their universes first. NaN inputs are rejected.
    pub fn decide(&self, speed: f64, distance: f64) -> FuzzyResult<BrakeDecision> {
        if speed.is_nan() {
            return Err(FuzzyError::NonFiniteInput("speed".to_string()));
        }
        if distance.is_nan() {
            return Err(FuzzyError::NonFiniteInput("distance".to_string()));
        }

        let speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        let distance = distance.clamp(*DISTANCE_RANGE.start(), *DISTANCE_RANGE.end());

        if distance >= speed * self.config.stopping_distance_ratio {
            debug!(speed, distance, "outside stopping distance, no braking");
            return Ok(BrakeDecision {
                pressure_percent: 0.,
                new_speed: speed,
            });
        }

        let inputs = Inputs::new()
            .with(self.speed, speed)
            .with(self.distance, distance);
        let outputs = self.engine.eval(&inputs)?;
        let crisp = outputs
            .crisp(self.pressure)
            .ok_or_else(|| FuzzyError::InvalidConfig("brake_pressure has no rules".to_string()))?;

        if crisp.fallback {
            debug!(speed, distance, policy = ?self.config.fallback, "no brake rule fired");
        }

        let pressure_percent = match (crisp.fallback, self.config.fallback) {
            (true, FallbackPolicy::NoBraking) => 0.,
            _ => crisp.value,
        }
        .clamp(*PRESSURE_RANGE.start(), *PRESSURE_RANGE.end());

        let new_speed = (speed * (1. - pressure_percent / 100.)).max(0.);

        trace!(speed, distance, pressure_percent, new_speed, "brake decision");

        Ok(BrakeDecision {
            pressure_percent,
            new_speed,
        })
    }

    /// [`BrakeController::decide`] as a `(pressure_percent, new_speed)` pair.
    pub fn compute_brake(&self, speed_kmh: f64, distance_m: f64) -> FuzzyResult<(f64, f64)> {
        let decision = self.decide(speed_kmh, distance_m)?;
        Ok((decision.pressure_percent, decision.new_speed))
    }
}
