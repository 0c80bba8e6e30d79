//! Synthetic statement and price fixtures shared by the integration tests.

#![allow(dead_code)]

use sagres_data::fields::{
    ASSETS, ASSETS_CURRENT, CAPEX, COST_OF_GOODS_SOLD, EPS_BASIC, LIABILITIES,
    LIABILITIES_CURRENT, OPERATING_CASH_FLOW, OPERATING_INCOME, RESEARCH_AND_DEVELOPMENT,
    REVENUES, SELLING_GENERAL_ADMIN, SHARES_OUTSTANDING, STOCKHOLDERS_EQUITY,
};
use sagres_data::{FinancialStatements, PeriodRecord, PriceTable};
use sagres_traits::Date;

pub const YEARS: [i32; 3] = [2021, 2022, 2023];

pub fn last_day() -> Date {
    Date::from_ymd_opt(2024, 3, 28).unwrap()
}

/// A price table with one row on the last day.
pub fn closing_prices(prices: &[(String, f64)]) -> PriceTable {
    let mut table = PriceTable::new(vec![last_day()]).unwrap();
    for (symbol, price) in prices {
        table.insert(symbol.as_str(), vec![Some(*price)]).unwrap();
    }
    table
}

/// Three years of equity and shares only.
pub fn plain_history(id: u64, ticker: &str) -> Vec<PeriodRecord> {
    YEARS
        .iter()
        .map(|&year| {
            PeriodRecord::new(id, year, ticker)
                .with_field(STOCKHOLDERS_EQUITY, 100.0)
                .with_field(SHARES_OUTSTANDING, 10.0)
        })
        .collect()
}

struct Fundamentals {
    operating_income: f64,
    cash_flow: f64,
    liabilities: f64,
    current_assets: f64,
    shares: f64,
    revenue: f64,
    cogs: f64,
}

fn f_score_record(id: u64, year: i32, ticker: &str, f: &Fundamentals) -> PeriodRecord {
    PeriodRecord::new(id, year, ticker)
        .with_field(ASSETS, 100.0)
        .with_field(STOCKHOLDERS_EQUITY, 100.0)
        .with_field(OPERATING_INCOME, f.operating_income)
        .with_field(OPERATING_CASH_FLOW, f.cash_flow)
        .with_field(LIABILITIES, f.liabilities)
        .with_field(LIABILITIES_CURRENT, 20.0)
        .with_field(ASSETS_CURRENT, f.current_assets)
        .with_field(SHARES_OUTSTANDING, f.shares)
        .with_field(REVENUES, f.revenue)
        .with_field(COST_OF_GOODS_SOLD, f.cogs)
}

const BASELINE: Fundamentals = Fundamentals {
    operating_income: 10.0,
    cash_flow: 12.0,
    liabilities: 40.0,
    current_assets: 40.0,
    shares: 10.0,
    revenue: 100.0,
    cogs: 70.0,
};

/// Passes all nine F-Score tests in 2023.
pub fn strong_f_score(id: u64, ticker: &str) -> Vec<PeriodRecord> {
    let before = Fundamentals {
        operating_income: 5.0,
        cash_flow: 6.0,
        liabilities: 50.0,
        current_assets: 30.0,
        revenue: 80.0,
        cogs: 60.0,
        ..BASELINE
    };
    vec![
        f_score_record(id, 2021, ticker, &before),
        f_score_record(id, 2022, ticker, &before),
        f_score_record(id, 2023, ticker, &BASELINE),
    ]
}

/// Fails all nine F-Score tests in 2023.
pub fn weak_f_score(id: u64, ticker: &str) -> Vec<PeriodRecord> {
    let after = Fundamentals {
        operating_income: -5.0,
        cash_flow: -8.0,
        liabilities: 50.0,
        current_assets: 30.0,
        shares: 12.0,
        revenue: 80.0,
        cogs: 60.0,
    };
    vec![
        f_score_record(id, 2021, ticker, &BASELINE),
        f_score_record(id, 2022, ticker, &BASELINE),
        f_score_record(id, 2023, ticker, &after),
    ]
}

/// An unchanged company: positive RoA and CFO, negative accrual and no
/// new shares, so exactly four tests pass.
pub fn flat_f_score(id: u64, ticker: &str) -> Vec<PeriodRecord> {
    YEARS
        .iter()
        .map(|&year| f_score_record(id, year, ticker, &BASELINE))
        .collect()
}

/// The F-Score universe: fifteen companies priced so that the three
/// scored ones form the top book-to-market quintile.
pub fn f_score_universe() -> (FinancialStatements, PriceTable) {
    let mut records = Vec::new();
    records.extend(strong_f_score(1, "STRONG"));
    records.extend(weak_f_score(2, "WEAK"));
    records.extend(flat_f_score(3, "FLAT"));
    let mut prices = vec![
        ("STRONG".to_string(), 10.0),
        ("WEAK".to_string(), 11.0),
        ("FLAT".to_string(), 12.0),
    ];
    for id in 4..=15u64 {
        let ticker = format!("V{id:02}");
        records.extend(plain_history(id, &ticker));
        prices.push((ticker, 20.0 + id as f64));
    }
    (FinancialStatements::from_records(records), closing_prices(&prices))
}

/// A growth company whose G-Score metrics all scale with `level`.
///
/// Higher levels mean higher profitability and spending, lower
/// variability, and a cash flow above RoA from level 2 upward.
pub fn g_score_history(id: u64, ticker: &str, sic: u32, level: f64) -> Vec<PeriodRecord> {
    let swing = (6.0 - level) * 0.5;
    let operating_income = [level, level + swing, level];
    let spread = (6.0 - level) * 0.05;
    let revenue = [100.0, 110.0, 110.0 * (1.1 + spread)];
    let cash_flow = if level >= 2.0 { 2.0 * level } else { 0.5 * level };

    YEARS
        .iter()
        .enumerate()
        .map(|(i, &year)| {
            let mut rec = PeriodRecord::new(id, year, ticker)
                .with_industry(sic)
                .with_field(ASSETS, 100.0)
                .with_field(STOCKHOLDERS_EQUITY, 100.0)
                .with_field(SHARES_OUTSTANDING, 10.0)
                .with_field(OPERATING_INCOME, operating_income[i])
                .with_field(REVENUES, revenue[i]);
            if i == YEARS.len() - 1 {
                rec = rec
                    .with_field(OPERATING_CASH_FLOW, cash_flow)
                    .with_field(RESEARCH_AND_DEVELOPMENT, level)
                    .with_field(CAPEX, level)
                    .with_field(SELLING_GENERAL_ADMIN, level);
            }
            rec
        })
        .collect()
}

/// The G-Score universe: twenty-five companies, the five most expensive of
/// which share an industry and form the bottom book-to-market quintile.
///
/// `fifth_sic` is the industry code of the fifth growth company.
pub fn g_score_universe(fifth_sic: u32) -> (FinancialStatements, PriceTable) {
    let mut records = Vec::new();
    let mut prices = Vec::new();
    for level in 1..=5u64 {
        let ticker = format!("G{level}");
        let sic = if level == 5 { fifth_sic } else { 3570 + level as u32 };
        records.extend(g_score_history(level, &ticker, sic, level as f64));
        prices.push((ticker, 100.0 + level as f64));
    }
    for id in 6..=25u64 {
        let ticker = format!("V{id:02}");
        records.extend(plain_history(id, &ticker).into_iter().map(|r| r.with_industry(2834)));
        prices.push((ticker, id as f64));
    }
    (FinancialStatements::from_records(records), closing_prices(&prices))
}

/// EPS histories with SUE increasing in the index.
pub fn pead_statements(companies: u64) -> FinancialStatements {
    let mut records = Vec::new();
    for id in 0..companies {
        let ticker = format!("E{id:02}");
        let history = [1.0, 1.2, 0.9, 1.1, 1.0 + 0.05 * id as f64];
        for (i, eps) in history.iter().enumerate() {
            records.push(PeriodRecord::new(id, 2019 + i as i32, ticker.as_str()).with_field(EPS_BASIC, *eps));
        }
    }
    FinancialStatements::from_records(records)
}

/// One price per month for `months` months, each security compounding at
/// its own monthly rate.
pub fn monthly_prices(months: u32, rates: &[(String, f64)]) -> PriceTable {
    let dates: Vec<Date> = (0..months)
        .map(|m| Date::from_ymd_opt(2023 + (m / 12) as i32, m % 12 + 1, 15).unwrap())
        .collect();
    let mut table = PriceTable::new(dates).unwrap();
    for (symbol, rate) in rates {
        let prices = (0..months)
            .map(|m| Some(50.0 * (1.0 + rate).powi(m as i32)))
            .collect();
        table.insert(symbol.as_str(), prices).unwrap();
    }
    table
}

/// Fifteen month-start prices for a peer group that shares one return
/// history, except in the last full month where each security's return is
/// offset by its own shift.
pub fn peer_group_prices(shifts: &[(String, f64)]) -> PriceTable {
    let months: usize = 15;
    let last_full = months - 2;
    let dates: Vec<Date> = (0..months as u32)
        .map(|m| Date::from_ymd_opt(2023 + (m / 12) as i32, m % 12 + 1, 1).unwrap())
        .collect();
    let mut table = PriceTable::new(dates).unwrap();
    for (symbol, shift) in shifts {
        let mut price = 100.0;
        let mut prices = vec![Some(price)];
        for m in 1..months {
            let base = if m % 2 == 0 { -0.01 } else { 0.02 };
            let rate = if m == last_full { base + shift } else { base };
            price *= 1.0 + rate;
            prices.push(Some(price));
        }
        table.insert(symbol.as_str(), prices).unwrap();
    }
    table
}
