use turbo::prelude::*;

fn space_1d() -> SearchSpace {
    SearchSpace::builder()
        .variable("x1", 0.0, 1.0)
        .objective("y1", Direction::Minimize)
        .build()
        .unwrap()
}

fn space_2d() -> SearchSpace {
    SearchSpace::builder()
        .variable("x1", 0.0, 1.0)
        .variable("x2", 0.0, 1.0)
        .objective("y1", Direction::Minimize)
        .build()
        .unwrap()
}

fn row_1d(x: f64, y: f64) -> Sample {
    Sample::from_iter([("x1", x), ("y1", y)])
}

#[test]
fn test_uninitialized_controller_fails() {
    let controller = OptimizeController::new(space_1d()).unwrap();
    let model = FixedLengthScales::uniform(1);
    assert!(matches!(
        controller.trust_region(Some(&model)).unwrap_err(),
        Error::NotInitialized
    ));

    let safety = SafetyController::new(space_1d()).unwrap();
    assert!(matches!(
        safety.trust_region(None).unwrap_err(),
        Error::NotInitialized
    ));
}

#[test]
fn test_optimize_requires_a_model() {
    let mut controller = OptimizeController::new(space_1d()).unwrap();
    controller.update_state(&[row_1d(0.5, 1.0)]).unwrap();
    assert!(matches!(
        controller.trust_region(None).unwrap_err(),
        Error::MissingModel
    ));
}

#[test]
fn test_length_scale_dimension_mismatch() {
    let mut controller = OptimizeController::new(space_2d()).unwrap();
    let history = vec![Sample::from_iter([("x1", 0.5), ("x2", 0.5), ("y1", 1.0)])];
    controller.update_state(&history).unwrap();

    let model = FixedLengthScales::uniform(3);
    assert!(matches!(
        controller.trust_region(Some(&model)).unwrap_err(),
        Error::LengthScaleDimensionMismatch {
            expected: 2,
            got: 3
        }
    ));
}

#[test]
fn test_region_stays_within_bounds_1d() {
    let mut controller = OptimizeController::new(space_1d()).unwrap();
    controller
        .update_state(&[row_1d(0.02, 1.0), row_1d(0.98, 0.5)])
        .unwrap();

    let model = FixedLengthScales::uniform(1);
    let region = controller.trust_region(Some(&model)).unwrap();
    assert!(region.lower()[0] >= 0.0);
    assert!(region.upper()[0] <= 1.0);
    assert!(region.lower()[0] <= region.upper()[0]);
    // Center 0.98, half-width 0.125: the upper edge is truncated.
    assert_eq!(region.upper()[0], 1.0);
}

#[test]
fn test_region_stays_within_bounds_2d() {
    let mut controller = OptimizeController::new(space_2d()).unwrap();
    let history = vec![
        Sample::from_iter([("x1", 0.1), ("x2", 0.9), ("y1", 1.0)]),
        Sample::from_iter([("x1", 0.6), ("x2", 0.4), ("y1", 0.3)]),
    ];
    controller.update_state(&history).unwrap();

    let model = FixedLengthScales::new(vec![0.5, 2.0]);
    let region = controller.trust_region(Some(&model)).unwrap();
    for i in 0..2 {
        assert!(region.lower()[i] >= 0.0);
        assert!(region.upper()[i] <= 1.0);
        assert!(region.lower()[i] <= region.upper()[i]);
    }
}

#[test]
fn test_length_scales_weight_each_dimension() {
    let mut controller = OptimizeController::new(space_2d()).unwrap();
    let history = vec![Sample::from_iter([("x1", 0.5), ("x2", 0.5), ("y1", 1.0)])];
    controller.update_state(&history).unwrap();

    // gm(1, 4) = 2 -> weights (0.5, 2); lengths 0.25 -> half-widths
    // (0.0625, 0.25) over unit-width bounds.
    let model = FixedLengthScales::new(vec![1.0, 4.0]);
    let region = controller.trust_region(Some(&model)).unwrap();
    assert!((region.lower()[0] - 0.4375).abs() < 1e-12);
    assert!((region.upper()[0] - 0.5625).abs() < 1e-12);
    assert!((region.lower()[1] - 0.25).abs() < 1e-12);
    assert!((region.upper()[1] - 0.75).abs() < 1e-12);
}

#[test]
fn test_degenerate_length_scales_fall_back_to_uniform() {
    let mut controller = OptimizeController::new(space_2d()).unwrap();
    let history = vec![Sample::from_iter([("x1", 0.5), ("x2", 0.5), ("y1", 1.0)])];
    controller.update_state(&history).unwrap();

    let degenerate = FixedLengthScales::new(vec![0.0, 1.0]);
    let uniform = FixedLengthScales::uniform(2);
    assert_eq!(
        controller.trust_region(Some(&degenerate)).unwrap(),
        controller.trust_region(Some(&uniform)).unwrap()
    );
}

#[test]
fn test_bounds_scale_the_region_width() {
    let space = SearchSpace::builder()
        .variable("x1", -10.0, 10.0)
        .objective("y1", Direction::Minimize)
        .build()
        .unwrap();
    let mut controller = OptimizeController::new(space).unwrap();
    controller
        .update_state(&[Sample::from_iter([("x1", 0.0), ("y1", 1.0)])])
        .unwrap();

    let model = FixedLengthScales::uniform(1);
    let region = controller.trust_region(Some(&model)).unwrap();
    // Length 0.25 of a width-20 bound: half-width 2.5.
    assert!((region.lower()[0] + 2.5).abs() < 1e-12);
    assert!((region.upper()[0] - 2.5).abs() < 1e-12);
}

#[test]
fn test_safety_region_is_purely_geometric() {
    let space = SearchSpace::builder()
        .variable("x", 0.0, 2.0)
        .objective("f", Direction::Minimize)
        .constraint("c", Relation::LessThan, 0.0)
        .build()
        .unwrap();
    let mut controller = SafetyController::new(space).unwrap();
    let history = vec![Sample::from_iter([("x", 1.0), ("f", 1.0), ("c", -1.0)])];
    controller.update_state(&history).unwrap();

    let region = controller.trust_region(None).unwrap();
    // Half-width 0.5 * 0.25 * 2.0 = 0.25 around the center 1.0.
    assert!((region.lower()[0] - 0.75).abs() < 1e-12);
    assert!((region.upper()[0] - 1.25).abs() < 1e-12);

    // A supplied model is ignored.
    let model = FixedLengthScales::new(vec![100.0]);
    assert_eq!(region, controller.trust_region(Some(&model)).unwrap());
}

#[test]
fn test_into_bounds() {
    let mut controller = SafetyController::new(
        SearchSpace::builder()
            .variable("x", 0.0, 1.0)
            .objective("f", Direction::Minimize)
            .build()
            .unwrap(),
    )
    .unwrap();
    controller
        .update_state(&[Sample::from_iter([("x", 0.5), ("f", 1.0)])])
        .unwrap();

    let (lower, upper) = controller.trust_region(None).unwrap().into_bounds();
    assert_eq!(lower.len(), 1);
    assert_eq!(upper.len(), 1);
    assert!(lower[0] <= upper[0]);
}
