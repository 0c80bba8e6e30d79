//! The entity-period store.
//!
//! One [`PeriodRecord`] per company per fiscal period, grouped into an
//! [`EntityHistory`] per company. Grouping is an explicit sort-then-group
//! step, so nothing downstream depends on the row order of the input table:
//! entities are ordered by id and each history by fiscal year.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use sagres_traits::{EntityId, FiscalYear, Result, SagresError, Symbol};
use tracing::{debug, info, warn};

use crate::fields::{
    ENTITY_ID_COLUMNS, FILED_COLUMN, FISCAL_YEAR_COLUMNS, INDUSTRY_COLUMNS, NAME_COLUMN,
    TICKER_COLUMN, is_identifier,
};
use crate::loader::{find_column, numeric_column, parse_date, string_column};

/// One fiscal period of one company.
///
/// Field values are stored only when present and finite; a field that was
/// not reported reads back as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    entity_id: EntityId,
    fiscal_year: FiscalYear,
    ticker: Symbol,
    name: Option<String>,
    industry_code: Option<u32>,
    filed: Option<String>,
    fields: BTreeMap<String, f64>,
}

impl PeriodRecord {
    /// Create a record with no financial fields.
    pub fn new(entity_id: EntityId, fiscal_year: FiscalYear, ticker: impl Into<Symbol>) -> Self {
        Self {
            entity_id,
            fiscal_year,
            ticker: ticker.into(),
            name: None,
            industry_code: None,
            filed: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the raw industry classification code (SIC).
    #[must_use]
    pub const fn with_industry(mut self, code: u32) -> Self {
        self.industry_code = Some(code);
        self
    }

    /// Set the company name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the filing date used to pick between restatements of one period.
    #[must_use]
    pub fn with_filed(mut self, filed: impl Into<String>) -> Self {
        self.filed = Some(filed.into());
        self
    }

    /// Set a financial field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Set or clear a financial field. Non-finite values are treated as absent.
    pub fn set(&mut self, field: impl Into<String>, value: Option<f64>) {
        let field = field.into();
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.fields.insert(field, v);
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    /// Value of a financial field, `None` if not reported.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }

    /// Entity identifier.
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Fiscal year of the period.
    pub const fn fiscal_year(&self) -> FiscalYear {
        self.fiscal_year
    }

    /// Trading symbol at the time of the filing.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Company name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw industry classification code.
    pub const fn industry_code(&self) -> Option<u32> {
        self.industry_code
    }

    /// Filing date, if known.
    pub fn filed(&self) -> Option<&str> {
        self.filed.as_deref()
    }

    /// Names of the fields present on this record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// All retained periods of one company, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHistory {
    entity_id: EntityId,
    periods: Vec<PeriodRecord>,
}

impl EntityHistory {
    /// Entity identifier.
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Periods ordered by fiscal year ascending.
    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    /// Number of retained periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the history holds no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The most recent period, if any.
    pub fn latest(&self) -> Option<&PeriodRecord> {
        self.periods.last()
    }

    /// Ticker of the most recent period, empty for an empty history.
    pub fn ticker(&self) -> &str {
        self.latest().map_or("", PeriodRecord::ticker)
    }

    /// Industry code of the most recent period.
    pub fn industry_code(&self) -> Option<u32> {
        self.latest().and_then(PeriodRecord::industry_code)
    }

    /// Fiscal years of the retained periods.
    pub fn fiscal_years(&self) -> Vec<FiscalYear> {
        self.periods.iter().map(PeriodRecord::fiscal_year).collect()
    }

    /// The values of one field across all periods.
    pub fn series(&self, field: &str) -> Vec<Option<f64>> {
        self.periods.iter().map(|p| p.get(field)).collect()
    }

    /// A derived per-period series.
    pub fn derive<F>(&self, f: F) -> Vec<Option<f64>>
    where
        F: Fn(&PeriodRecord) -> Option<f64>,
    {
        self.periods.iter().map(f).collect()
    }
}

/// The entity-period store.
#[derive(Debug, Clone, Default)]
pub struct FinancialStatements {
    entities: Vec<EntityHistory>,
    columns: BTreeSet<String>,
}

impl FinancialStatements {
    /// Build the store from records in any order.
    ///
    /// At most one record is retained per `(entity_id, fiscal_year)`. When
    /// the input carries several, the one with the latest filing date wins,
    /// and among equal filing dates the one that came last in the input.
    /// Filing dates are compared as dates, so `YYYYMMDD` and `YYYY-MM-DD`
    /// spellings mix freely; an unparseable date ranks below any valid one.
    pub fn from_records(records: impl IntoIterator<Item = PeriodRecord>) -> Self {
        let mut indexed: Vec<(usize, PeriodRecord)> = records.into_iter().enumerate().collect();
        let columns: BTreeSet<String> = indexed
            .iter()
            .flat_map(|(_, r)| r.field_names().map(str::to_string))
            .collect();

        indexed.sort_by_cached_key(|(i, r)| {
            let filed = r.filed().and_then(|f| parse_date(f).ok());
            (r.entity_id, r.fiscal_year, filed, *i)
        });

        let total = indexed.len();
        let mut retained: Vec<PeriodRecord> = Vec::with_capacity(total);
        for (_, record) in indexed {
            match retained.last_mut() {
                Some(last)
                    if last.entity_id == record.entity_id
                        && last.fiscal_year == record.fiscal_year =>
                {
                    *last = record;
                }
                _ => retained.push(record),
            }
        }
        if retained.len() < total {
            warn!(
                dropped = total - retained.len(),
                "duplicate (entity, fiscal year) records; kept the most recent filing"
            );
        }

        let mut entities: Vec<EntityHistory> = Vec::new();
        for record in retained {
            match entities.last_mut() {
                Some(history) if history.entity_id == record.entity_id => {
                    history.periods.push(record);
                }
                _ => entities.push(EntityHistory {
                    entity_id: record.entity_id,
                    periods: vec![record],
                }),
            }
        }

        Self { entities, columns }
    }

    /// Declare columns that exist in the source table even if no record
    /// reports a value for them.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Build the store from a normalized statement table.
    ///
    /// Requires an entity id (`entity_id` or `cik`), a fiscal year
    /// (`fiscal_year` or `year`) and a `ticker` column. `industry_code`/`sic`,
    /// `name` and `filed` are optional; every other non-string column is a
    /// financial field. Rows missing an identifier are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let entity_col = find_column(df, ENTITY_ID_COLUMNS)
            .ok_or_else(|| SagresError::MissingColumn(ENTITY_ID_COLUMNS[0].to_string()))?;
        let year_col = find_column(df, FISCAL_YEAR_COLUMNS)
            .ok_or_else(|| SagresError::MissingColumn(FISCAL_YEAR_COLUMNS[0].to_string()))?;
        if find_column(df, &[TICKER_COLUMN]).is_none() {
            return Err(SagresError::MissingColumn(TICKER_COLUMN.to_string()));
        }

        let entity_ids = numeric_column(df, entity_col)?;
        let years = numeric_column(df, year_col)?;
        let tickers = string_column(df, TICKER_COLUMN)?;
        let industries = match find_column(df, INDUSTRY_COLUMNS) {
            Some(name) => Some(numeric_column(df, name)?),
            None => None,
        };
        let names = match find_column(df, &[NAME_COLUMN]) {
            Some(name) => Some(string_column(df, name)?),
            None => None,
        };
        let filed = match find_column(df, &[FILED_COLUMN]) {
            Some(name) => Some(string_column(df, name)?),
            None => None,
        };

        let mut field_columns: Vec<(String, Vec<Option<f64>>)> = Vec::new();
        for column in df.get_columns() {
            let name = column.name().as_str();
            if is_identifier(name) {
                continue;
            }
            if column.dtype() == &DataType::String {
                debug!(column = name, "skipping non-numeric statement column");
                continue;
            }
            field_columns.push((name.to_string(), numeric_column(df, name)?));
        }

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;
        for row in 0..df.height() {
            let (Some(id), Some(year), Some(ticker)) =
                (entity_ids[row], years[row], tickers[row].as_ref())
            else {
                skipped += 1;
                continue;
            };
            if id < 0.0 {
                skipped += 1;
                continue;
            }

            let mut record = PeriodRecord::new(id as EntityId, year as FiscalYear, ticker.clone());
            if let Some(code) = industries.as_ref().and_then(|c| c[row]).filter(|c| *c >= 0.0) {
                record = record.with_industry(code as u32);
            }
            if let Some(name) = names.as_ref().and_then(|n| n[row].clone()) {
                record = record.with_name(name);
            }
            if let Some(date) = filed.as_ref().and_then(|f| f[row].clone()) {
                record = record.with_filed(date);
            }
            for (field, values) in &field_columns {
                record.set(field.as_str(), values[row]);
            }
            records.push(record);
        }

        if skipped > 0 {
            warn!(skipped, "statement rows without entity id, fiscal year or ticker");
        }

        let store = Self::from_records(records)
            .with_columns(field_columns.into_iter().map(|(name, _)| name));
        info!(
            rows = df.height(),
            entities = store.len(),
            periods = store.period_count(),
            "loaded financial statements"
        );
        Ok(store)
    }

    /// Entity histories ordered by entity id.
    pub fn entities(&self) -> &[EntityHistory] {
        &self.entities
    }

    /// Look up one entity.
    pub fn entity(&self, id: EntityId) -> Option<&EntityHistory> {
        self.entities
            .binary_search_by_key(&id, EntityHistory::entity_id)
            .ok()
            .map(|idx| &self.entities[idx])
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of retained periods across all entities.
    pub fn period_count(&self) -> usize {
        self.entities.iter().map(EntityHistory::len).sum()
    }

    /// Financial field columns known to the store.
    pub const fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    /// Checks if a field column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Fail with [`SagresError::MissingColumn`] on the first absent column.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(SagresError::MissingColumn((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// The newest fiscal year in the store.
    pub fn latest_fiscal_year(&self) -> Option<FiscalYear> {
        self.entities
            .iter()
            .filter_map(|e| e.latest().map(PeriodRecord::fiscal_year))
            .max()
    }
}
