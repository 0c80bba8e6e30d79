//! Financial statement ratios.
//!
//! Every function returns `None` when an operand is absent, a denominator is
//! zero, or the result is not finite. Fallbacks between XBRL tags are
//! explicit and listed on the function that applies them; no other missing
//! value is ever replaced.

use sagres_data::PeriodRecord;
use sagres_data::fields::{
    ASSETS_CURRENT, CONTRACT_REVENUE, COST_OF_GOODS_SOLD, COST_OF_REVENUE, INCOME_TAXES_PAID,
    INCOME_TAXES_PAID_NET, LIABILITIES, LIABILITIES_CURRENT, OTHER_LIABILITIES_NONCURRENT,
    REVENUES,
};
use sagres_traits::stats;

/// `numerator / denominator`, absent on a zero denominator.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator.filter(|d| *d != 0.0)?;
    Some(numerator? / denominator).filter(|v| v.is_finite())
}

/// `a - b`.
pub fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// Return on assets: operating income over an asset base.
pub fn return_on_assets(operating_income: Option<f64>, assets: Option<f64>) -> Option<f64> {
    ratio(operating_income, assets)
}

/// Operating cash flow over an asset base.
pub fn cash_flow_to_assets(operating_cash_flow: Option<f64>, assets: Option<f64>) -> Option<f64> {
    ratio(operating_cash_flow, assets)
}

/// Accrual: return on assets minus the cash-flow ratio.
pub fn accrual(return_on_assets: Option<f64>, cash_flow_to_assets: Option<f64>) -> Option<f64> {
    difference(return_on_assets, cash_flow_to_assets)
}

/// Revenue, falling back to contract revenue when `Revenues` is absent.
pub fn revenue(record: &PeriodRecord) -> Option<f64> {
    record.get(REVENUES).or_else(|| record.get(CONTRACT_REVENUE))
}

/// Gross profit: revenue minus cost of goods sold, falling back to cost of
/// revenue when the former is absent.
pub fn gross_profit(record: &PeriodRecord) -> Option<f64> {
    let revenue = revenue(record);
    difference(revenue, record.get(COST_OF_GOODS_SOLD))
        .or_else(|| difference(revenue, record.get(COST_OF_REVENUE)))
}

/// Gross profit over revenue.
pub fn gross_margin(record: &PeriodRecord) -> Option<f64> {
    ratio(gross_profit(record), revenue(record))
}

/// Non-current liabilities: total minus current, falling back to other
/// non-current liabilities.
pub fn noncurrent_liabilities(record: &PeriodRecord) -> Option<f64> {
    difference(record.get(LIABILITIES), record.get(LIABILITIES_CURRENT))
        .or_else(|| record.get(OTHER_LIABILITIES_NONCURRENT))
}

/// Non-current liabilities over average assets.
pub fn leverage(noncurrent_liabilities: Option<f64>, average_assets: Option<f64>) -> Option<f64> {
    ratio(noncurrent_liabilities, average_assets)
}

/// Current assets over current liabilities.
pub fn current_ratio(record: &PeriodRecord) -> Option<f64> {
    ratio(record.get(ASSETS_CURRENT), record.get(LIABILITIES_CURRENT))
}

/// Revenue over beginning-of-year assets.
pub fn turnover(revenue: Option<f64>, beginning_assets: Option<f64>) -> Option<f64> {
    ratio(revenue, beginning_assets)
}

/// An expense over beginning-of-year assets (R&D, capex, SG&A intensity).
pub fn intensity(expense: Option<f64>, beginning_assets: Option<f64>) -> Option<f64> {
    ratio(expense, beginning_assets)
}

/// Income taxes paid, falling back to the net figure.
pub fn income_taxes_paid(record: &PeriodRecord) -> Option<f64> {
    record
        .get(INCOME_TAXES_PAID)
        .or_else(|| record.get(INCOME_TAXES_PAID_NET))
}

/// Book-to-market: `equity / (shares * price)`.
pub fn book_to_market(equity: Option<f64>, shares: Option<f64>, price: Option<f64>) -> Option<f64> {
    ratio(equity, Some(shares? * price?))
}

/// Standardized unexpected earnings.
///
/// The expectation is the mean of the trailing EPS values and the scale
/// their sample standard deviation. Needs at least two trailing values and
/// a non-zero standard deviation.
pub fn standardized_unexpected_earnings(current: f64, trailing: &[f64]) -> Option<f64> {
    let expected = stats::mean(trailing)?;
    let std = stats::sample_std(trailing).filter(|s| *s > stats::MIN_STD_THRESHOLD)?;
    Some((current - expected) / std).filter(|v| v.is_finite())
}

/// Inputs of the accrual decomposition, all for the same period.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualInputs {
    /// Change in current assets.
    pub delta_current_assets: Option<f64>,
    /// Change in cash and equivalents.
    pub delta_cash: Option<f64>,
    /// Change in current liabilities.
    pub delta_current_liabilities: Option<f64>,
    /// Change in income taxes paid.
    pub delta_taxes_paid: Option<f64>,
    /// Depreciation, depletion and amortization.
    pub depreciation: Option<f64>,
    /// Average of current and prior total assets.
    pub average_assets: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
}

impl AccrualInputs {
    /// Whether every input is present.
    pub const fn is_complete(&self) -> bool {
        self.delta_current_assets.is_some()
            && self.delta_cash.is_some()
            && self.delta_current_liabilities.is_some()
            && self.delta_taxes_paid.is_some()
            && self.depreciation.is_some()
            && self.average_assets.is_some()
            && self.operating_income.is_some()
    }
}

/// Earnings split into accrual and cash components, scaled by average assets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualDecomposition {
    /// Balance-sheet accrual:
    /// `ΔCA - ΔCash - (ΔCL - ΔTaxesPaid) - Depreciation`.
    pub accrual: f64,
    /// Operating income over average assets.
    pub income_rate: f64,
    /// Accrual over average assets.
    pub accrual_component: f64,
    /// Income rate minus accrual component.
    pub cash_component: f64,
}

impl AccrualDecomposition {
    /// Decompose earnings, `None` if an input is absent or assets are zero.
    pub fn compute(inputs: &AccrualInputs) -> Option<Self> {
        let accrual = inputs.delta_current_assets?
            - inputs.delta_cash?
            - (inputs.delta_current_liabilities? - inputs.delta_taxes_paid?)
            - inputs.depreciation?;
        let income_rate = ratio(inputs.operating_income, inputs.average_assets)?;
        let accrual_component = ratio(Some(accrual), inputs.average_assets)?;
        Some(Self {
            accrual,
            income_rate,
            accrual_component,
            cash_component: income_rate - accrual_component,
        })
    }
}
