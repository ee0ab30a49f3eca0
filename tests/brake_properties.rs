//! Property-based tests for the brake controller and membership functions.

use fuzzy_brake::{BrakeController, MembershipFunction};
use proptest::prelude::*;

fn shape() -> impl Strategy<Value = MembershipFunction> {
    let triangle = prop::array::uniform3(-1000.0f64..1000.0).prop_map(|mut p| {
        p.sort_by(f64::total_cmp);
        MembershipFunction::Triangular { a: p[0], b: p[1], c: p[2] }
    });
    let trapezoid = prop::array::uniform4(-1000.0f64..1000.0).prop_map(|mut p| {
        p.sort_by(f64::total_cmp);
        MembershipFunction::Trapezoidal {
            a: p[0],
            b: p[1],
            c: p[2],
            d: p[3],
        }
    });

    prop_oneof![triangle, trapezoid]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_shortcut_returns_input_speed(speed in 0.0f64..=100.0, slack in 0.0f64..=1.0) {
        let controller = BrakeController::new().unwrap();
        let distance = speed / 2. + slack * (50. - speed / 2.);

        let (pressure, new_speed) = controller.compute_brake(speed, distance).unwrap();

        prop_assert_eq!(pressure, 0.);
        prop_assert_eq!(new_speed, speed);
    }

    #[test]
    fn prop_outputs_within_range(speed in -50.0f64..=150.0, distance in -20.0f64..=80.0) {
        let controller = BrakeController::new().unwrap();
        let clamped_speed = speed.clamp(0., 100.);

        let decision = controller.decide(speed, distance).unwrap();

        prop_assert!(
            (0.0..=100.0).contains(&decision.pressure_percent),
            "pressure {} out of range",
            decision.pressure_percent
        );
        prop_assert!(
            decision.new_speed >= 0. && decision.new_speed <= clamped_speed,
            "new speed {} outside [0, {}]",
            decision.new_speed,
            clamped_speed
        );
    }

    #[test]
    fn prop_decisions_are_deterministic(speed in 0.0f64..=100.0, distance in 0.0f64..=50.0) {
        let controller = BrakeController::new().unwrap();

        let first = controller.decide(speed, distance).unwrap();
        let second = controller.decide(speed, distance).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, BrakeController::new().unwrap().decide(speed, distance).unwrap());
    }

    #[test]
    fn prop_inference_path_brakes(speed in 1.0f64..=100.0, fraction in 0.0f64..0.99) {
        let controller = BrakeController::new().unwrap();
        let distance = fraction * speed / 2.;

        let decision = controller.decide(speed, distance).unwrap();

        prop_assert!(decision.braking_required());
        prop_assert!(decision.new_speed < speed);
    }

    #[test]
    fn prop_membership_is_total(mf in shape(), x in prop::num::f64::ANY) {
        let degree = mf.degree(x);
        let (lo, hi) = mf.support();

        prop_assert!((0.0..=1.0).contains(&degree), "degree {} at {}", degree, x);
        if x < lo || x > hi {
            prop_assert_eq!(degree, 0.);
        }
    }
}
