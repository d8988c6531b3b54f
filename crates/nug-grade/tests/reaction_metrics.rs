use nug_core::{Channel, GradingOptions, ScoredMetric, WeightingSpectrum};
use nug_grade::{DataGap, Measurement, Reaction, ReactionStatus, ReferenceCurve};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn options(metric: ScoredMetric) -> GradingOptions {
    GradingOptions::neutrons()
        .with_bounds(1.0, 5.0)
        .with_energy_width(1.0)
        .with_scored_metric(metric)
}

fn flat_curve() -> ReferenceCurve {
    ReferenceCurve::new(vec![1.0, 5.0], vec![10.0, 10.0]).expect("curve")
}

fn table() -> Vec<Measurement> {
    vec![
        Measurement::new(1.0, 11.0, "A").with_value_uncertainty(0.5),
        Measurement::new(2.0, 9.0, "A").with_value_uncertainty(0.5),
        Measurement::new(3.0, 10.5, "A")
            .with_value_uncertainty(0.5)
            .with_dataset("A.2"),
        Measurement::new(4.0, 12.0, "B"),
        Measurement::new(6.0, 5.0, "B"),
    ]
}

fn loaded() -> Reaction {
    let mut reaction = Reaction::new(&Channel::new(1, "N,TOT"));
    reaction.load(table());
    reaction
}

#[test]
fn relative_error_aggregates_experiments_by_coverage() {
    let mut reaction = loaded();
    reaction
        .calc_metrics(&flat_curve(), &options(ScoredMetric::RelativeError))
        .expect("metrics");

    assert_eq!(reaction.status(), ReactionStatus::Scored);
    assert_eq!(reaction.gap(), None);
    assert_eq!(reaction.point_count(), 5);
    assert_eq!(reaction.in_range_count(), 4);
    assert_eq!(reaction.dataset_count(), 3);
    assert_close(reaction.energy_coverage(), 87.5);
    assert_close(reaction.energy_coverage_with_uncertainty(), 62.5);

    let a = &reaction.experiments()["A"];
    assert_close(a.weighted_metric, 25.0 / 3.0);
    assert_close(a.energy_coverage, 62.5);
    assert_eq!(a.point_count, 3);
    let b = &reaction.experiments()["B"];
    assert_close(b.weighted_metric, 20.0);
    assert_close(b.energy_coverage, 25.0);

    assert_close(reaction.average_metric(), 257.4404761904762);
    assert_close(reaction.score(), 24.47960033305579);
    assert_eq!(reaction.points().len(), 4);
}

#[test]
fn chi_squared_ignores_points_without_uncertainty() {
    let mut reaction = loaded();
    reaction
        .calc_metrics(&flat_curve(), &options(ScoredMetric::ChiSquared))
        .expect("metrics");

    let a = &reaction.experiments()["A"];
    assert_close(a.weighted_metric, 3.0);
    assert_close(a.energy_coverage, 62.5);
    let b = &reaction.experiments()["B"];
    assert_eq!(b.weighted_metric, 0.0);
    assert_eq!(b.energy_coverage, 0.0);

    assert_close(reaction.average_metric(), 93.75);
    assert_close(reaction.score(), 87.5 / 94.75);
    assert!(reaction.score() <= reaction.energy_coverage());
}

#[test]
fn repeated_grading_is_idempotent() {
    let mut reaction = loaded();
    let options = options(ScoredMetric::RelativeError);
    reaction.calc_metrics(&flat_curve(), &options).expect("first");
    let first = reaction.report();
    reaction.calc_metrics(&flat_curve(), &options).expect("second");
    assert_eq!(reaction.report(), first);
    assert_eq!(reaction.score(), first.score);
}

#[test]
fn empty_table_scores_zero() {
    let mut reaction = Reaction::new(&Channel::new(1, "N,TOT"));
    reaction.load(Vec::new());
    assert_eq!(reaction.status(), ReactionStatus::Empty);
    reaction
        .calc_metrics(&flat_curve(), &options(ScoredMetric::ChiSquared))
        .expect("metrics");

    assert_eq!(reaction.energy_coverage(), 0.0);
    assert_eq!(reaction.average_metric(), 0.0);
    assert_eq!(reaction.score(), 0.0);
    assert_eq!(reaction.gap(), Some(DataGap::NoMeasurements));
}

#[test]
fn table_outside_the_window_reports_no_data_in_range() {
    let mut reaction = Reaction::new(&Channel::new(1, "N,TOT"));
    reaction.load(vec![Measurement::new(8.0, 10.0, "A")]);
    reaction
        .calc_metrics(&flat_curve(), &options(ScoredMetric::RelativeError))
        .expect("metrics");

    assert_eq!(reaction.gap(), Some(DataGap::NoDataInRange));
    assert_eq!(reaction.score(), 0.0);
    assert_eq!(reaction.point_count(), 1);
    assert!(!reaction.report().has_data_in_range());
}

#[test]
fn zero_total_coverage_falls_back_to_unit_metric() {
    let curve = ReferenceCurve::new(vec![1.0, 5.0], vec![0.0, 0.0]).expect("curve");
    let mut reaction = Reaction::new(&Channel::new(1, "N,TOT"));
    reaction.load(vec![
        Measurement::new(2.0, 1.0, "A"),
        Measurement::new(3.0, 1.0, "A"),
    ]);
    reaction
        .calc_metrics(&curve, &options(ScoredMetric::RelativeError))
        .expect("metrics");

    assert_eq!(reaction.average_metric(), 1.0);
    assert_eq!(reaction.experiments()["A"].undefined_points, 2);
    assert!(reaction.points().is_empty());
    assert_close(
        reaction.score(),
        reaction.energy_coverage() / 1.01,
    );
}

#[test]
fn missing_evaluation_keeps_counts_but_zeroes_metrics() {
    let mut reaction = loaded();
    reaction.mark_unavailable(DataGap::MissingEvaluation);
    assert_eq!(reaction.status(), ReactionStatus::Loaded);
    assert_eq!(reaction.point_count(), 5);
    assert_eq!(reaction.score(), 0.0);

    reaction.mark_unavailable(DataGap::LoadFailed);
    assert_eq!(reaction.status(), ReactionStatus::Empty);
    assert_eq!(reaction.point_count(), 0);
}

#[test]
fn flux_weighting_rescales_the_metric() {
    let mut flat = loaded();
    flat.calc_metrics(&flat_curve(), &options(ScoredMetric::RelativeError))
        .expect("flat");

    let mut weighted = loaded();
    let options = options(ScoredMetric::RelativeError)
        .with_weighting_spectrum(WeightingSpectrum::MaxwellBoltzmannRoomTemp);
    weighted
        .calc_metrics(&flat_curve(), &options)
        .expect("weighted");

    // Far above kT the Maxwellian is vanishingly small.
    assert!(weighted.average_metric() < flat.average_metric());
    assert_eq!(weighted.energy_coverage(), flat.energy_coverage());
}

#[test]
fn experiments_carry_publication_and_uncertainty_shares() {
    let mut reaction = Reaction::new(&Channel::new(1, "N,TOT"));
    reaction.load(vec![
        Measurement::new(1.5, 10.0, "A")
            .with_value_uncertainty(0.5)
            .with_energy_uncertainty(0.01)
            .with_publication(1972, "Smith"),
        Measurement::new(2.5, 11.0, "A").with_publication(1972, "Smith"),
        Measurement::new(3.5, 9.0, "B")
            .with_value_uncertainty(0.2)
            .with_publication(1988, "Jones"),
        Measurement::new(4.5, 10.0, "C"),
        Measurement::new(9.0, 10.0, "D").with_energy_uncertainty(0.1),
    ]);

    assert_eq!(reaction.experiment_count(), 4);
    assert_close(reaction.value_uncertainty_share(), 50.0);
    assert_close(reaction.energy_uncertainty_share(), 50.0);

    reaction
        .calc_metrics(&flat_curve(), &options(ScoredMetric::RelativeError))
        .expect("metrics");
    let a = &reaction.experiments()["A"];
    assert_eq!(a.author, "Smith");
    assert_eq!(a.year, Some(1972));
    assert_eq!(reaction.experiments()["B"].year, Some(1988));
    assert_eq!(reaction.experiments()["C"].author, "");
    assert!(!reaction.experiments().contains_key("D"));

    let report = reaction.report();
    assert_eq!(report.experiment_count, 4);
    assert_close(report.value_uncertainty_share, 50.0);

    reaction.mark_unavailable(DataGap::LoadFailed);
    assert_eq!(reaction.experiment_count(), 0);
    assert_eq!(reaction.value_uncertainty_share(), 0.0);
}
