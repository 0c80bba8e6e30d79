//! Financial statement field names.
//!
//! Fields are named after the US-GAAP XBRL tags the statement table is built
//! from, so a column in the input table maps one-to-one onto a constant here.

/// Total assets.
pub const ASSETS: &str = "Assets";
/// Current assets.
pub const ASSETS_CURRENT: &str = "AssetsCurrent";
/// Cash and cash equivalents.
pub const CASH: &str = "CashAndCashEquivalentsAtCarryingValue";
/// Total liabilities.
pub const LIABILITIES: &str = "Liabilities";
/// Current liabilities.
pub const LIABILITIES_CURRENT: &str = "LiabilitiesCurrent";
/// Other non-current liabilities, used when total minus current is unavailable.
pub const OTHER_LIABILITIES_NONCURRENT: &str = "OtherLiabilitiesNoncurrent";
/// Income taxes paid.
pub const INCOME_TAXES_PAID: &str = "IncomeTaxesPaid";
/// Income taxes paid, net of refunds; fallback for [`INCOME_TAXES_PAID`].
pub const INCOME_TAXES_PAID_NET: &str = "IncomeTaxesPaidNet";
/// Depreciation, depletion and amortization.
pub const DEPRECIATION: &str = "DepreciationDepletionAndAmortization";
/// Operating income (loss).
pub const OPERATING_INCOME: &str = "OperatingIncomeLoss";
/// Stockholders' equity (book value).
pub const STOCKHOLDERS_EQUITY: &str = "StockholdersEquity";
/// Weighted average basic shares outstanding.
pub const SHARES_OUTSTANDING: &str = "WeightedAverageNumberOfSharesOutstandingBasic";
/// Net cash from operating activities.
pub const OPERATING_CASH_FLOW: &str = "NetCashProvidedByUsedInOperatingActivities";
/// Total revenues.
pub const REVENUES: &str = "Revenues";
/// Contract revenue (ASC 606); fallback for [`REVENUES`].
pub const CONTRACT_REVENUE: &str = "RevenueFromContractWithCustomerExcludingAssessedTax";
/// Cost of goods and services sold.
pub const COST_OF_GOODS_SOLD: &str = "CostOfGoodsAndServicesSold";
/// Cost of revenue; fallback for [`COST_OF_GOODS_SOLD`].
pub const COST_OF_REVENUE: &str = "CostOfRevenue";
/// Basic earnings per share.
pub const EPS_BASIC: &str = "EarningsPerShareBasic";
/// Research and development expense.
pub const RESEARCH_AND_DEVELOPMENT: &str = "ResearchAndDevelopmentExpense";
/// Selling, general and administrative expense.
pub const SELLING_GENERAL_ADMIN: &str = "SellingGeneralAndAdministrativeExpense";
/// Capital expenditure on property, plant and equipment.
pub const CAPEX: &str = "PaymentsToAcquirePropertyPlantAndEquipment";

/// Identifier columns accepted for the entity id, in order of preference.
pub const ENTITY_ID_COLUMNS: &[&str] = &["entity_id", "cik"];
/// Identifier columns accepted for the fiscal year.
pub const FISCAL_YEAR_COLUMNS: &[&str] = &["fiscal_year", "year"];
/// Identifier columns accepted for the industry classification code.
pub const INDUSTRY_COLUMNS: &[&str] = &["industry_code", "sic"];
/// Trading symbol column.
pub const TICKER_COLUMN: &str = "ticker";
/// Optional company name column.
pub const NAME_COLUMN: &str = "name";
/// Optional filing date column used to resolve restatements.
pub const FILED_COLUMN: &str = "filed";
/// Date column of the price table.
pub const DATE_COLUMNS: &[&str] = &["date", "Date"];

/// Returns true if `column` is an identifier rather than a financial field.
pub fn is_identifier(column: &str) -> bool {
    ENTITY_ID_COLUMNS.contains(&column)
        || FISCAL_YEAR_COLUMNS.contains(&column)
        || INDUSTRY_COLUMNS.contains(&column)
        || column == TICKER_COLUMN
        || column == NAME_COLUMN
        || column == FILED_COLUMN
}
