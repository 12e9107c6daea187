use electricity_cost_calculator::{
    estimator::{self, Field, FieldIssue, RangeProblem, UsageInput},
    report::{format_fixed, round_to_places, EstimateReport},
};

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} vs {b} (tol {tol})");
}

fn report_for(power: f64, hours: f64, rate: f64) -> EstimateReport {
    let est = estimator::estimate(power, hours, rate).expect("valid input");
    EstimateReport::new("Test", &est, "INR", "₹")
}

#[test]
fn heater_four_hours() {
    let est = estimator::estimate(2000.0, 4.0, 6.0).expect("heater");
    assert_eq!(est.units_per_day, 8.0);
    assert_eq!(est.units_per_month, 240.0);
    assert_eq!(est.cost_per_day, 48.0);
    assert_eq!(est.cost_per_month, 1440.0);

    let rep = EstimateReport::new("Heater", &est, "INR", "₹");
    assert_eq!(rep.units_per_day, "8.00");
    assert_eq!(rep.cost_per_day, "48.00");
    assert_eq!(rep.units_per_month, "240.00");
    assert_eq!(rep.cost_per_month, "1440.00");
}

#[test]
fn bulb_five_hours() {
    let rep = report_for(10.0, 5.0, 6.0);
    assert_eq!(rep.units_per_day, "0.05");
    assert_eq!(rep.cost_per_day, "0.30");
    assert_eq!(rep.cost_per_month, "9.00");
}

#[test]
fn fan_half_hour_rounds_half_up() {
    let est = estimator::estimate(75.0, 0.5, 6.0).expect("fan");
    assert_close(est.units_per_day, 0.0375, 1e-15);
    let rep = EstimateReport::new("Fan", &est, "INR", "₹");
    assert_eq!(rep.units_per_day, "0.04");
    assert_eq!(rep.cost_per_day, "0.23");
    assert_eq!(rep.units_per_month, "1.13");
    assert_eq!(rep.cost_per_month, "6.75");
}

#[test]
fn zero_hours_is_rejected() {
    let err = estimator::estimate(100.0, 0.0, 6.0).unwrap_err();
    assert_eq!(
        err.issue_for(Field::Hours),
        Some(&FieldIssue::InvalidRange {
            field: Field::Hours,
            problem: RangeProblem::ZeroOrNegative
        })
    );
    assert!(!err.has_field(Field::Power));
}

#[test]
fn negative_power_is_rejected() {
    let err = estimator::estimate(-5.0, 5.0, 6.0).unwrap_err();
    assert!(err.has_field(Field::Power));
    assert_eq!(err.issues().len(), 1);
}

#[test]
fn hours_above_a_day_are_rejected() {
    let err = estimator::estimate(100.0, 24.5, 6.0).unwrap_err();
    assert_eq!(
        err.issues(),
        &[FieldIssue::InvalidRange {
            field: Field::Hours,
            problem: RangeProblem::ExceedsDay
        }]
    );
    // 24시간은 허용
    assert!(estimator::estimate(100.0, 24.0, 6.0).is_ok());
}

#[test]
fn zero_rate_gives_free_electricity() {
    let est = estimator::estimate(1500.0, 8.0, 0.0).expect("zero rate");
    assert_eq!(est.units_per_day, 12.0);
    assert_eq!(est.cost_per_day, 0.0);
    assert_eq!(est.cost_per_month, 0.0);
}

#[test]
fn boundary_inputs_never_produce_numbers() {
    assert!(estimator::estimate(0.0, 5.0, 6.0).is_err());
    assert!(estimator::estimate(100.0, 0.0, 6.0).is_err());
    assert!(estimator::estimate(100.0, 5.0, -0.01).is_err());
    assert!(estimator::estimate(f64::NAN, 5.0, 6.0).is_err());
    assert!(estimator::estimate(100.0, f64::INFINITY, 6.0).is_err());
    assert!(estimator::estimate(100.0, 5.0, f64::INFINITY).is_err());
}

#[test]
fn every_failing_field_is_reported() {
    let err = estimator::estimate(0.0, 30.0, -1.0).unwrap_err();
    let fields: Vec<Field> = err.issues().iter().map(|i| i.field()).collect();
    assert_eq!(fields, vec![Field::Power, Field::Hours, Field::Rate]);
    let text = err.to_string();
    assert!(text.starts_with("invalid input: "), "{text}");
    assert!(text.contains("hours per day must not exceed 24 hours"), "{text}");
}

#[test]
fn monthly_figures_are_thirty_days() {
    let powers = [1.0, 10.0, 75.0, 333.3, 2000.0];
    let hours = [0.25, 0.5, 1.0, 7.7, 24.0];
    let rates = [0.0, 0.1, 6.0, 12.75];
    for &p in &powers {
        for &h in &hours {
            for &r in &rates {
                let est = estimator::estimate(p, h, r).expect("valid");
                assert_eq!(est.units_per_month, est.units_per_day * 30.0);
                let expected = est.cost_per_day * 30.0;
                assert_close(est.cost_per_month, expected, expected.abs() * 1e-12);
            }
        }
    }
}

#[test]
fn estimate_is_idempotent() {
    let a = estimator::estimate(123.4, 3.3, 6.5).expect("a");
    let b = estimator::estimate(123.4, 3.3, 6.5).expect("b");
    assert_eq!(a, b);
}

#[test]
fn cost_never_decreases_when_an_input_grows() {
    let base = (100.0, 5.0, 6.0);
    let mut prev = 0.0;
    for step in 1..=50 {
        let p = step as f64 * 40.0;
        let c = estimator::estimate(p, base.1, base.2).expect("p").cost_per_day;
        assert!(c >= prev, "power {p}: {c} < {prev}");
        prev = c;
    }
    prev = 0.0;
    for step in 1..=48 {
        let h = step as f64 * 0.5;
        let c = estimator::estimate(base.0, h, base.2).expect("h").cost_per_day;
        assert!(c >= prev, "hours {h}: {c} < {prev}");
        prev = c;
    }
    prev = 0.0;
    for step in 0..=40 {
        let r = step as f64 * 0.25;
        let c = estimator::estimate(base.0, base.1, r).expect("r").cost_per_day;
        assert!(c >= prev, "rate {r}: {c} < {prev}");
        prev = c;
    }
}

#[test]
fn parse_reports_missing_and_non_numeric_fields() {
    let err = UsageInput::parse(None, Some("  "), Some("six")).unwrap_err();
    assert_eq!(
        err.issues(),
        &[
            FieldIssue::MissingInput { field: Field::Power },
            FieldIssue::MissingInput { field: Field::Hours },
            FieldIssue::InvalidRange {
                field: Field::Rate,
                problem: RangeProblem::NonNumeric
            },
        ]
    );
}

#[test]
fn parse_checks_ranges_of_readable_fields() {
    let err = UsageInput::parse(Some("abc"), Some("25"), Some("6")).unwrap_err();
    assert_eq!(err.issues().len(), 2);
    assert_eq!(
        err.issue_for(Field::Hours),
        Some(&FieldIssue::InvalidRange {
            field: Field::Hours,
            problem: RangeProblem::ExceedsDay
        })
    );

    let input = UsageInput::parse(Some(" 100 "), Some("5"), Some("6")).expect("valid");
    assert_eq!(input, UsageInput::new(100.0, 5.0, 6.0));
}

#[test]
fn rounding_pulls_ties_away_from_zero() {
    assert_eq!(round_to_places(0.225, 2), 0.23);
    assert_eq!(round_to_places(0.0375 * 6.0, 2), 0.23);
    assert_eq!(round_to_places(1.125, 2), 1.13);
    assert_eq!(round_to_places(-1.125, 2), -1.13);
    assert_eq!(round_to_places(0.224, 2), 0.22);
    assert_eq!(format_fixed(0.30000000000000004, 2), "0.30");
    assert_eq!(format_fixed(-0.001, 2), "0.00");
    assert_eq!(format_fixed(1440.0, 2), "1440.00");
}

#[test]
fn values_just_below_a_tie_round_down() {
    assert_eq!(round_to_places(0.22499999999, 2), 0.22);
    assert_eq!(round_to_places(1.004999999, 2), 1.0);
    assert_eq!(format_fixed(-3.144999999, 2), "-3.14");
}

#[test]
fn large_values_keep_their_cents() {
    assert_eq!(format_fixed(1e10, 2), "10000000000.00");
    assert_eq!(format_fixed(1e12, 2), "1000000000000.00");
    assert_eq!(format_fixed(12_345_678.125, 2), "12345678.13");
    assert_eq!(round_to_places(1e17, 2), 1e17);

    let est = estimator::estimate(1e9, 24.0, 10.0).expect("big plant");
    assert_eq!(est.cost_per_month, 7_200_000_000.0);
    let rep = EstimateReport::new("Plant", &est, "INR", "₹");
    assert_eq!(rep.cost_per_month, "7200000000.00");
    assert_eq!(rep.units_per_day, "24000000.00");
}

#[test]
fn overflowing_products_are_rejected() {
    let err = estimator::estimate(1e306, 24.0, 1e6).unwrap_err();
    assert_eq!(
        err.issues(),
        &[FieldIssue::InvalidRange {
            field: Field::Power,
            problem: RangeProblem::ResultOverflow
        }]
    );
    assert!(err.to_string().contains("too large"), "{err}");

    // 하루 전력량에서 이미 넘치는 경우
    assert!(estimator::estimate(f64::MAX, 24.0, 0.0).is_err());
}

#[test]
fn report_lines() {
    let rep = report_for(100.0, 5.0, 6.0);
    assert_eq!(rep.usage_line(), "100 Watts × 5 Hours");
    assert_eq!(rep.money(&rep.cost_per_month), "₹90.00");
    assert_eq!(rep.rate_line(), "Rate: ₹6 per unit (kWh)");
    let text = rep.to_string();
    assert!(text.contains("Daily Cost:   ₹3.00 (0.50 units)"), "{text}");
    assert!(text.contains("Monthly Cost: ₹90.00 (15.00 units)"), "{text}");
}
