use chrono::NaiveDate;

use qsk_engine::{parse_csv_bars, BarSet, SimEngine};
use qsk_regression::BenchmarkOverrideCheck;

const BARS_CSV: &str = include_str!("fixtures/spy_2013_10_week.csv");

#[test]
fn parity_benchmark_passes_across_the_window() {
    let bars = parse_csv_bars(BARS_CSV).expect("parse fixture csv");
    let engine = SimEngine::new(BarSet::from_bars(bars));

    let report = engine
        .run(&mut BenchmarkOverrideCheck::new())
        .expect("regression passes");

    assert_eq!(report.days_delivered, 5);

    // Odd day-of-month reads 2, even reads 1: Mon 7th through Fri 11th.
    let d = |day: u32| NaiveDate::from_ymd_opt(2013, 10, day).unwrap();
    let expected = vec![(d(7), 2), (d(8), 1), (d(9), 2), (d(10), 1), (d(11), 2)];
    assert_eq!(report.benchmark_curve, expected);
}
