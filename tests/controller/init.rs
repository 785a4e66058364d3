use turbo::prelude::*;

fn space(dim: usize) -> SearchSpace {
    let mut builder = SearchSpace::builder().objective("f", Direction::Minimize);
    for i in 0..dim {
        builder = builder.variable(format!("x{i}"), 0.0, 1.0);
    }
    builder.build().unwrap()
}

#[test]
fn test_optimize_defaults() {
    let controller = OptimizeController::new(space(1)).unwrap();
    assert_eq!(controller.dim(), 1);
    assert_eq!(controller.success_counter(), 0);
    assert_eq!(controller.failure_counter(), 0);
    assert_eq!(controller.center(), None);
    assert_eq!(controller.best_value(), f64::INFINITY);
    assert_eq!(controller.lengths(), &[0.25]);
}

#[test]
fn test_safety_defaults() {
    let controller = SafetyController::new(space(3)).unwrap();
    assert_eq!(controller.dim(), 3);
    assert_eq!(controller.center(), None);
    assert_eq!(controller.lengths(), &[0.25, 0.25, 0.25]);
    assert_eq!(controller.min_feasible_fraction(), 0.75);
}

#[test]
fn test_default_tolerances_are_two() {
    // Two non-improving updates shrink the region under default
    // tolerances; a third has no further effect until the streak rebuilds.
    let mut controller = OptimizeController::new(space(1)).unwrap();
    let history = vec![
        Sample::from_iter([("x0", 0.1), ("f", 1.0)]),
        Sample::from_iter([("x0", 0.2), ("f", 1.0)]),
        Sample::from_iter([("x0", 0.3), ("f", 1.0)]),
    ];
    controller.update_state(&history).unwrap();
    assert_eq!(controller.failure_counter(), 1);
    assert_eq!(controller.lengths(), &[0.25]);

    controller.update_state(&history).unwrap();
    assert_eq!(controller.failure_counter(), 0);
    assert_eq!(controller.lengths(), &[0.125]);
}

#[test]
fn test_zero_success_tolerance_rejected() {
    let err = OptimizeController::builder(space(1))
        .success_tolerance(0)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTolerance {
            name: "success_tolerance"
        }
    ));
}

#[test]
fn test_zero_failure_tolerance_rejected() {
    let err = SafetyController::builder(space(1))
        .failure_tolerance(0)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTolerance {
            name: "failure_tolerance"
        }
    ));
}

#[test]
fn test_zero_batch_size_rejected() {
    let err = OptimizeController::builder(space(1))
        .batch_size(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_initial_length_outside_limits_rejected() {
    let err = OptimizeController::builder(space(1))
        .initial_length(2.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let err = OptimizeController::builder(space(1))
        .length_min(0.5)
        .initial_length(0.25)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_scale_factor_must_exceed_one() {
    let err = OptimizeController::builder(space(1))
        .scale_factor(1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_invalid_feasible_fraction_rejected() {
    let err = SafetyController::builder(space(1))
        .min_feasible_fraction(1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_empty_search_space_rejected() {
    let err = SearchSpace::builder()
        .objective("f", Direction::Minimize)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::EmptySearchSpace));
}
