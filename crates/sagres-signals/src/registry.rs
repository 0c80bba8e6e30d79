//! Strategy registry for discovering and describing the available strategies.
//!
//! This module holds the static metadata of every strategy: canonical name,
//! aliases accepted on the command line, category, the hypothesis the
//! strategy trades on and the research it comes from.

use std::fmt;
use std::str::FromStr;

use sagres_traits::SagresError;
use serde::{Deserialize, Serialize};

/// The seven strategies of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Piotroski F-Score on value stocks.
    FScore,
    /// Post-earnings announcement drift.
    Pead,
    /// Intermediate price momentum.
    Momentum,
    /// Mohanram G-Score on growth stocks.
    GScore,
    /// Accrual anatomy of earnings.
    Accruals,
    /// Betting against beta.
    Beta,
    /// Equity pairs reversal.
    Pairs,
}

impl StrategyKind {
    /// Every strategy, in display order.
    pub const ALL: [Self; 7] = [
        Self::FScore,
        Self::Pead,
        Self::Momentum,
        Self::GScore,
        Self::Accruals,
        Self::Beta,
        Self::Pairs,
    ];

    /// Canonical identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FScore => "f_score",
            Self::Pead => "pead",
            Self::Momentum => "momentum",
            Self::GScore => "g_score",
            Self::Accruals => "accruals",
            Self::Beta => "beta",
            Self::Pairs => "pairs",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FScore => "Piotroski F-Score",
            Self::Pead => "PEAD",
            Self::Momentum => "Momentum",
            Self::GScore => "G-Score",
            Self::Accruals => "Accruals Anatomy",
            Self::Beta => "Betting against Beta",
            Self::Pairs => "Equity Pairs",
        }
    }

    /// Additional names accepted when parsing.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::FScore => &["fscore", "piotroski"],
            Self::Pead => &["sue", "earnings_drift"],
            Self::Momentum => &["mom"],
            Self::GScore => &["gscore", "mohanram"],
            Self::Accruals => &["accrual", "accrual_anatomy"],
            Self::Beta => &["bab", "betting_against_beta"],
            Self::Pairs => &["equity_pairs"],
        }
    }

    /// Metadata for this strategy.
    #[must_use]
    pub const fn info(self) -> StrategyInfo {
        match self {
            Self::FScore => StrategyInfo {
                kind: self,
                category: StrategyCategory::Value,
                description: "Nine binary financial strength tests on the top book-to-market quintile",
                hypothesis: &[
                    "Market does not fully incorporate historical financial information into prices in a timely manner",
                    "Average high book to market firms are financially distressed, with declining margins, profits and cash flows",
                    "Financial variables that reflect changes in these conditions predict future firm performance",
                ],
                approach: &[
                    "Trade on the top book-to-market quintile",
                    "Score profitability, capital structure and efficiency",
                    "Long high scores (7 or more), short low scores (2 or less)",
                ],
                reference: "https://www.ivey.uwo.ca/media/3775523/value_investing_the_use_of_historical_financial_statement_information.pdf",
                requires_statements: true,
                requires_prices: true,
            },
            Self::Pead => StrategyInfo {
                kind: self,
                category: StrategyCategory::Earnings,
                description: "Standardized unexpected earnings, decile-ranked",
                hypothesis: &[
                    "Stock prices do not adjust instantaneously to the information in earnings announcements",
                    "The market's earnings expectations differ from the process generating earnings",
                    "Extreme good news announcers outperform extreme bad news announcers after the announcement",
                ],
                approach: &[
                    "Compute SUE against the mean and standard deviation of the previous four annual EPS",
                    "Long the top decile, short the bottom decile",
                ],
                reference: "https://citeseerx.ist.psu.edu/viewdoc/download?doi=10.1.1.52.7343&rep=rep1&type=pdf",
                requires_statements: true,
                requires_prices: false,
            },
            Self::Momentum => StrategyInfo {
                kind: self,
                category: StrategyCategory::Momentum,
                description: "Mean monthly return over 12 months skipping the latest, decile-ranked",
                hypothesis: &[
                    "Rising stock prices tend to rise further and falling prices to fall further",
                    "Investors underreact to information and overreact with a delay",
                ],
                approach: &[
                    "Average the monthly returns of the last 12 months, dropping the most recent one",
                    "Long the top decile, short the bottom decile",
                ],
                reference: "https://papers.ssrn.com/sol3/papers.cfm?abstract_id=225167",
                requires_statements: false,
                requires_prices: true,
            },
            Self::GScore => StrategyInfo {
                kind: self,
                category: StrategyCategory::Growth,
                description: "Eight industry-relative growth tests on the bottom book-to-market quintile",
                hypothesis: &[
                    "Strong growth firms are more likely to beat earnings forecasts",
                    "The market ignores the implications of growth fundamentals for future performance",
                ],
                approach: &[
                    "Trade on the bottom book-to-market quintile",
                    "Score profitability, variability and spending intensity against the two-digit industry median",
                    "Long high scores (6 or more), short low scores (2 or less)",
                ],
                reference: "https://papers.ssrn.com/sol3/papers.cfm?abstract_id=403180",
                requires_statements: true,
                requires_prices: true,
            },
            Self::Accruals => StrategyInfo {
                kind: self,
                category: StrategyCategory::Earnings,
                description: "Cash component of earnings scaled by average assets, decile-ranked",
                hypothesis: &[
                    "Investors fixate on earnings and miss the split between accruals and cash flows",
                    "The accrual component of earnings is less persistent than the cash component",
                ],
                approach: &[
                    "Decompose operating income over average assets into accrual and cash components",
                    "Rank on the cash component into deciles and trade the two extremes",
                ],
                reference: "https://www.wm.edu/offices/auxiliary/osher/course-info/classnotes/shanesloan1996tar1.pdf",
                requires_statements: true,
                requires_prices: false,
            },
            Self::Beta => StrategyInfo {
                kind: self,
                category: StrategyCategory::Risk,
                description: "Beta against a market index, split at the cross-sectional median",
                hypothesis: &[
                    "Alphas and Sharpe ratios decline monotonically in beta",
                    "Leverage-constrained investors bid up high-beta assets",
                ],
                approach: &[
                    "Estimate each stock's beta from daily returns since the start date",
                    "Long stocks below the median beta, short the rest",
                ],
                reference: "https://pages.stern.nyu.edu/~lpederse/papers/BettingAgainstBeta.pdf",
                requires_statements: false,
                requires_prices: true,
            },
            Self::Pairs => StrategyInfo {
                kind: self,
                category: StrategyCategory::Reversion,
                description: "Last month's return against its 50 most correlated peers, decile-ranked",
                hypothesis: &[
                    "Historical return correlations identify pairs that move together",
                    "When a stock diverges from its peers the gap tends to close",
                ],
                approach: &[
                    "Find the 50 most correlated peers from monthly returns",
                    "Compare the last full month's return with the peers' mean",
                    "Long the decile that lagged its peers most, short the one that led them most",
                ],
                reference: "http://www.pbcsf.tsinghua.edu.cn/research/chenzhuo/paper/1.3.Empirical%20Investigation%20of%20an%20Equity%20Pairs%20Trading%20Strategy.pdf",
                requires_statements: false,
                requires_prices: true,
            },
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SagresError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized || kind.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| SagresError::StrategyNotFound(s.to_string()))
    }
}

/// Strategy category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyCategory {
    /// Value stocks screened on financial strength
    Value,
    /// Growth stocks screened against their industry
    Growth,
    /// Earnings surprises and earnings quality
    Earnings,
    /// Price trend following
    Momentum,
    /// Systematic risk exposure
    Risk,
    /// Relative mispricing between similar stocks
    Reversion,
}

impl StrategyCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Value => "High book-to-market companies scored on financial statement signals",
            Self::Growth => "Low book-to-market companies scored against industry peers",
            Self::Earnings => "Earnings surprises and the cash/accrual split of earnings",
            Self::Momentum => "Continuation of intermediate-horizon price trends",
            Self::Risk => "Sensitivity to the market and the low-beta anomaly",
            Self::Reversion => "Divergence from highly correlated peers",
        }
    }
}

/// Metadata about a strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyInfo {
    /// Which strategy
    pub kind: StrategyKind,

    /// Category classification
    pub category: StrategyCategory,

    /// One-line description
    pub description: &'static str,

    /// The market inefficiency the strategy trades on
    pub hypothesis: &'static [&'static str],

    /// How the signals are formed
    pub approach: &'static [&'static str],

    /// Research paper the strategy follows
    pub reference: &'static str,

    /// Whether the strategy reads the financial statement table
    pub requires_statements: bool,

    /// Whether the strategy reads the price table
    pub requires_prices: bool,
}

impl StrategyInfo {
    /// Canonical identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Get information about all available strategies.
#[must_use]
pub fn available_strategies() -> Vec<StrategyInfo> {
    StrategyKind::ALL.into_iter().map(StrategyKind::info).collect()
}

/// Get all strategies in a specific category.
#[must_use]
pub fn strategies_by_category(category: &StrategyCategory) -> Vec<StrategyInfo> {
    available_strategies()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a strategy by name or alias.
#[must_use]
pub fn get_strategy_info(name: &str) -> Option<StrategyInfo> {
    name.parse::<StrategyKind>().ok().map(StrategyKind::info)
}

/// Get all categories that have strategies.
#[must_use]
pub fn available_categories() -> Vec<StrategyCategory> {
    let mut categories: Vec<_> = available_strategies()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort_by_key(|c| format!("{c:?}"));
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_strategies() {
        let strategies = available_strategies();
        assert_eq!(strategies.len(), StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            assert_eq!(kind.info().kind, kind);
        }
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("f_score".parse::<StrategyKind>().unwrap(), StrategyKind::FScore);
        assert_eq!("F-Score".parse::<StrategyKind>().unwrap(), StrategyKind::FScore);
        assert_eq!("bab".parse::<StrategyKind>().unwrap(), StrategyKind::Beta);
        assert_eq!(" Pairs ".parse::<StrategyKind>().unwrap(), StrategyKind::Pairs);

        let err = "value".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, SagresError::StrategyNotFound(_)));
    }

    #[test]
    fn test_display_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_strategies_by_category() {
        let earnings = strategies_by_category(&StrategyCategory::Earnings);
        assert_eq!(earnings.len(), 2);
        assert!(
            strategies_by_category(&StrategyCategory::Value)
                .iter()
                .all(|s| s.requires_statements)
        );
    }

    #[test]
    fn test_get_strategy_info() {
        let info = get_strategy_info("momentum").unwrap();
        assert_eq!(info.name(), "momentum");
        assert!(!info.requires_statements);
        assert!(info.reference.starts_with("http"));
        assert!(get_strategy_info("nonexistent").is_none());
    }

    #[test]
    fn test_available_categories() {
        let categories = available_categories();
        assert_eq!(categories.len(), 6);
        assert!(!StrategyCategory::Risk.description().is_empty());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StrategyKind::GScore).unwrap();
        assert_eq!(json, "\"g_score\"");
    }
}
