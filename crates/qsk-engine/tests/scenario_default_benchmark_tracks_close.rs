use chrono::NaiveDate;

use qsk_algorithm::{Algorithm, AlgorithmAbort, DataContext, InitContext, Resolution, Slice};
use qsk_engine::{parse_csv_bars, BarSet, SimEngine};

const BARS_CSV: &str = include_str!("fixtures/spy_2013_10_week.csv");

struct PassThrough;

impl Algorithm for PassThrough {
    fn name(&self) -> &'static str {
        "pass_through"
    }

    fn initialize(&mut self, init: &mut InitContext) {
        init.set_start_date(2013, 10, 7);
        init.set_end_date(2013, 10, 11);
        init.add_equity("SPY", Resolution::Daily);
        // No brokerage model set: the default has no injected benchmark.
    }

    fn on_data(&mut self, ctx: &mut DataContext<'_>, slice: &Slice) -> Result<(), AlgorithmAbort> {
        // The default provider reports the delivered day's close.
        let bar = slice.get("SPY").expect("SPY bar present");
        assert_eq!(ctx.benchmark().evaluate(ctx.time()), bar.close_micros);
        Ok(())
    }
}

#[test]
fn default_benchmark_reports_primary_symbol_closes() {
    let bars = parse_csv_bars(BARS_CSV).expect("parse fixture csv");
    let engine = SimEngine::new(BarSet::from_bars(bars));

    let report = engine.run(&mut PassThrough).expect("run");

    let d = |day: u32| NaiveDate::from_ymd_opt(2013, 10, day).unwrap();
    let expected = vec![
        (d(7), 167_430_000),
        (d(8), 165_480_000),
        (d(9), 165_600_000),
        (d(10), 169_170_000),
        (d(11), 170_260_000),
    ];
    assert_eq!(report.benchmark_curve, expected);
}
