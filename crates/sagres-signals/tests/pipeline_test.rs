//! Integration tests for running several strategies through the pipeline.

mod common;

use common::{monthly_prices, pead_statements};
use sagres_data::fields::{
    ASSETS, ASSETS_CURRENT, CASH, DEPRECIATION, INCOME_TAXES_PAID, LIABILITIES_CURRENT,
    OPERATING_INCOME,
};
use sagres_data::{FinancialStatements, PeriodRecord, Universe};
use sagres_signals::{Accruals, Pipeline, PipelineConfig, Strategy, StrategyKind};
use sagres_traits::{Position, SagresError};

fn momentum_rates() -> Vec<(String, f64)> {
    (0..10)
        .map(|i| (format!("M{i}"), 0.01 * (i + 1) as f64))
        .collect()
}

fn full_universe() -> Universe {
    Universe::new()
        .with_statements(pead_statements(10))
        .with_prices(monthly_prices(13, &momentum_rates()))
}

/// Two years of balance sheet movement with operating income `income`.
fn accrual_history(id: u64, ticker: &str, last_year: i32, income: f64) -> Vec<PeriodRecord> {
    [(last_year - 1, 1.0), (last_year, 1.5)]
        .into_iter()
        .map(|(year, scale)| {
            PeriodRecord::new(id, year, ticker)
                .with_field(ASSETS, 200.0 * scale)
                .with_field(ASSETS_CURRENT, 100.0 * scale)
                .with_field(CASH, 20.0 * scale)
                .with_field(LIABILITIES_CURRENT, 50.0 * scale)
                .with_field(INCOME_TAXES_PAID, 5.0 * scale)
                .with_field(DEPRECIATION, 4.0)
                .with_field(OPERATING_INCOME, income)
        })
        .collect()
}

#[test]
fn test_runs_are_repeatable() {
    let universe = full_universe();
    let pipeline = Pipeline::default();
    let kinds = [StrategyKind::Pead, StrategyKind::Momentum];

    let first = pipeline.run(&universe, &kinds);
    let second = pipeline.run(&universe, &kinds);
    assert_eq!(first.failure_count(), 0);
    for kind in kinds {
        let a = first.get(kind).unwrap().as_ref().unwrap();
        let b = second.get(kind).unwrap().as_ref().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}

#[test]
fn test_missing_prices_fail_only_price_strategies() {
    let universe = Universe::new().with_statements(pead_statements(10));
    let report = Pipeline::default().run(
        &universe,
        &[StrategyKind::Pead, StrategyKind::Momentum, StrategyKind::Pairs],
    );

    assert_eq!(report.len(), 3);
    assert_eq!(report.failure_count(), 2);
    assert!(matches!(
        report.get(StrategyKind::Momentum),
        Some(Err(SagresError::MissingInput(_)))
    ));
    assert!(matches!(
        report.get(StrategyKind::Pairs),
        Some(Err(SagresError::MissingInput(_)))
    ));

    let succeeded: Vec<StrategyKind> = report.succeeded().map(|(kind, _)| kind).collect();
    assert_eq!(succeeded, vec![StrategyKind::Pead]);
}

#[test]
fn test_missing_columns_reported_per_strategy() {
    let report = Pipeline::default().run(&full_universe(), &[StrategyKind::FScore, StrategyKind::Accruals]);
    assert_eq!(report.failure_count(), 2);
    assert!(matches!(
        report.get(StrategyKind::FScore),
        Some(Err(SagresError::MissingColumn(_)))
    ));
}

#[test]
fn test_configured_bucket_count() {
    let config: PipelineConfig =
        serde_json::from_str(r#"{"momentum": {"buckets": 5}}"#).unwrap();
    let report = Pipeline::new(config).run(&full_universe(), &[StrategyKind::Momentum]);

    let signals = report.get(StrategyKind::Momentum).unwrap().as_ref().unwrap();
    assert_eq!(signals.len(), 4);
    assert_eq!(signals["M0"], Position::Short);
    assert_eq!(signals["M1"], Position::Short);
    assert_eq!(signals["M8"], Position::Long);
    assert_eq!(signals["M9"], Position::Long);
}

#[test]
fn test_accruals_extreme_deciles() {
    let mut records = Vec::new();
    for i in 0..10u64 {
        records.extend(accrual_history(i, &format!("A{i}"), 2023, 30.0 + i as f64));
    }
    // Stale filer, left out before ranking.
    records.extend(accrual_history(99, "OLD", 2020, 500.0));
    let universe = Universe::new().with_statements(FinancialStatements::from_records(records));

    let signals = Accruals::default().generate(&universe).unwrap();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals["A0"], Position::Long);
    assert_eq!(signals["A9"], Position::Short);
    assert!(!signals.contains_key("OLD"));
}

#[test]
fn test_accruals_need_a_tax_column() {
    let records = accrual_history(1, "A1", 2023, 30.0).into_iter().map(|mut rec| {
        rec.set(INCOME_TAXES_PAID, None);
        rec
    });
    let statements = FinancialStatements::from_records(records);
    assert!(!statements.has_column(INCOME_TAXES_PAID));
    let universe = Universe::new().with_statements(statements);
    let err = Accruals::default().generate(&universe).unwrap_err();
    assert!(matches!(err, SagresError::MissingColumn(_)));
}
