//! Cross-sectional ranking.
//!
//! Two tools are shared by the strategies: equal-frequency quantile
//! buckets over a cross-section, and medians within two-digit industry
//! peer groups.

use std::collections::BTreeMap;

use sagres_traits::{Result, SagresError, stats};
use tracing::{debug, warn};

/// Number of buckets for a decile split.
pub const DECILES: usize = 10;

/// Number of buckets for a quintile split.
pub const QUINTILES: usize = 5;

/// Default number of members an industry group must exceed to be kept.
pub const MIN_INDUSTRY_PEERS: usize = 4;

/// Assign each present value to one of `buckets` equal-frequency buckets.
///
/// Values are sorted ascending, ties keeping their input order, and the
/// value at sorted position `p` of `n` goes to bucket `p * buckets / n`.
/// Bucket sizes therefore differ by at most one and the assignment is
/// monotonic in the value. Absent and non-finite values get no bucket.
///
/// # Errors
///
/// [`SagresError::DegenerateDistribution`] when the present values hold
/// fewer distinct numbers than `buckets`, and [`SagresError::InvalidData`]
/// when `buckets` is zero. An input without present values is not an
/// error and yields no assignment.
pub fn quantile_buckets(values: &[Option<f64>], buckets: usize) -> Result<Vec<Option<usize>>> {
    if buckets == 0 {
        return Err(SagresError::InvalidData(
            "Quantile bucketing needs at least one bucket".to_string(),
        ));
    }

    let mut ranked: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i, v)))
        .collect();

    let mut assignment = vec![None; values.len()];
    let n = ranked.len();
    if n == 0 {
        return Ok(assignment);
    }

    let present: Vec<f64> = ranked.iter().map(|(_, v)| *v).collect();
    let distinct = stats::distinct_count(&present);
    if distinct < buckets {
        warn!(distinct, buckets, "degenerate cross-section for quantile ranking");
        return Err(SagresError::DegenerateDistribution { distinct, buckets });
    }

    // `sort_by` is stable, so equal values keep input order.
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    for (position, (index, _)) in ranked.into_iter().enumerate() {
        assignment[index] = Some(position * buckets / n);
    }
    debug!(n, buckets, "quantile buckets assigned");
    Ok(assignment)
}

/// Two-digit industry code: the raw code zero-padded to four digits,
/// first two characters.
pub fn two_digit_industry(code: u32) -> String {
    format!("{code:04}").chars().take(2).collect()
}

/// Membership of a cross-section in two-digit industry peer groups.
///
/// Groups with `min_peers` members or fewer are dropped together with
/// their members, as are entities without an industry code.
#[derive(Debug, Clone)]
pub struct IndustryGroups {
    group_of: Vec<Option<String>>,
}

impl IndustryGroups {
    /// Group a cross-section by the raw industry codes of its members.
    pub fn new(codes: &[Option<u32>], min_peers: usize) -> Self {
        let keys: Vec<Option<String>> = codes.iter().map(|c| c.map(two_digit_industry)).collect();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for key in keys.iter().flatten() {
            *counts.entry(key.as_str()).or_default() += 1;
        }
        let kept: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > min_peers)
            .map(|(key, _)| key.to_string())
            .collect();

        let group_of: Vec<Option<String>> = keys
            .into_iter()
            .map(|key| key.filter(|k| kept.contains(k)))
            .collect();
        debug!(groups = kept.len(), "industry peer groups");
        Self { group_of }
    }

    /// Group key of a member, `None` if it was dropped.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.group_of.get(index).and_then(|g| g.as_deref())
    }

    /// Whether a member belongs to a retained group.
    pub fn is_member(&self, index: usize) -> bool {
        self.group(index).is_some()
    }

    /// Number of members in retained groups.
    pub fn member_count(&self) -> usize {
        self.group_of.iter().filter(|g| g.is_some()).count()
    }

    /// For every member, the median of `values` over its group.
    ///
    /// Absent values are skipped when computing a median; a group without
    /// any present value has no median.
    pub fn medians(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut by_group: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (group, value) in self.group_of.iter().zip(values) {
            if let (Some(group), Some(value)) = (group, value.filter(|v| v.is_finite())) {
                by_group.entry(group.as_str()).or_default().push(value);
            }
        }
        let medians: BTreeMap<&str, f64> = by_group
            .into_iter()
            .filter_map(|(group, values)| stats::median(&values).map(|m| (group, m)))
            .collect();

        self.group_of
            .iter()
            .map(|group| group.as_deref().and_then(|g| medians.get(g).copied()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sizes(assignment: &[Option<usize>], buckets: usize) -> Vec<usize> {
        let mut sizes = vec![0; buckets];
        for bucket in assignment.iter().flatten() {
            sizes[*bucket] += 1;
        }
        sizes
    }

    #[rstest]
    #[case(10, 10)]
    #[case(23, 10)]
    #[case(7, 5)]
    #[case(101, 5)]
    fn test_bucket_sizes_differ_by_at_most_one(#[case] n: usize, #[case] buckets: usize) {
        let values: Vec<Option<f64>> = (0..n).map(|i| Some(((i * 37) % n) as f64)).collect();
        let assignment = quantile_buckets(&values, buckets).unwrap();
        let sizes = sizes(&assignment, buckets);
        let max = sizes.iter().max().unwrap();
        let min = sizes.iter().min().unwrap();
        assert!(max - min <= 1, "sizes {sizes:?}");
        assert_eq!(sizes.iter().sum::<usize>(), n);
    }

    #[test]
    fn test_buckets_are_monotonic() {
        let values: Vec<Option<f64>> = [5.0, -1.0, 3.0, 9.0, 0.5, 7.0, 2.0, 8.0, 4.0, 6.0]
            .into_iter()
            .map(Some)
            .collect();
        let assignment = quantile_buckets(&values, 5).unwrap();
        let mut pairs: Vec<(f64, usize)> = values
            .iter()
            .zip(&assignment)
            .map(|(v, b)| (v.unwrap(), b.unwrap()))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert!(pairs.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(assignment[1], Some(0));
        assert_eq!(assignment[3], Some(4));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let values = vec![Some(1.0), Some(1.0), Some(2.0), Some(3.0)];
        let assignment = quantile_buckets(&values, 2).unwrap();
        assert_eq!(assignment, vec![Some(0), Some(0), Some(1), Some(1)]);

        let values = vec![Some(2.0), Some(1.0), Some(1.0), Some(1.0)];
        let assignment = quantile_buckets(&values, 2).unwrap();
        assert_eq!(assignment, vec![Some(1), Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let values = vec![Some(1.0), None, Some(2.0), Some(f64::NAN)];
        let assignment = quantile_buckets(&values, 2).unwrap();
        assert_eq!(assignment, vec![Some(0), None, Some(1), None]);
    }

    #[test]
    fn test_degenerate_distribution() {
        let values = vec![Some(1.0); 12];
        let err = quantile_buckets(&values, 10).unwrap_err();
        assert!(matches!(
            err,
            SagresError::DegenerateDistribution {
                distinct: 1,
                buckets: 10
            }
        ));
    }

    #[test]
    fn test_empty_and_zero_buckets() {
        assert!(quantile_buckets(&[], 10).unwrap().is_empty());
        assert_eq!(quantile_buckets(&[None, None], 10).unwrap(), vec![None, None]);
        assert!(matches!(
            quantile_buckets(&[Some(1.0)], 0),
            Err(SagresError::InvalidData(_))
        ));
    }

    #[rstest]
    #[case(3571, "35")]
    #[case(100, "01")]
    #[case(7, "00")]
    #[case(2834, "28")]
    fn test_two_digit_industry(#[case] code: u32, #[case] expected: &str) {
        assert_eq!(two_digit_industry(code), expected);
    }

    #[test]
    fn test_industry_groups_drop_small_groups() {
        let codes = vec![
            Some(3571),
            Some(3572),
            Some(3576),
            Some(3577),
            Some(3578),
            Some(2834),
            Some(2836),
            None,
        ];
        let groups = IndustryGroups::new(&codes, MIN_INDUSTRY_PEERS);
        assert_eq!(groups.group(0), Some("35"));
        assert!(groups.is_member(4));
        assert!(!groups.is_member(5));
        assert!(!groups.is_member(7));
        assert_eq!(groups.member_count(), 5);
    }

    #[test]
    fn test_industry_medians_skip_absent() {
        let codes = vec![Some(3571), Some(3572), Some(3576), Some(3577), Some(3578), Some(2834)];
        let groups = IndustryGroups::new(&codes, MIN_INDUSTRY_PEERS);
        let values = vec![Some(1.0), Some(4.0), None, Some(2.0), Some(3.0), Some(100.0)];
        let medians = groups.medians(&values);
        assert_eq!(medians[0], Some(2.5));
        assert_eq!(medians[2], Some(2.5));
        assert_eq!(medians[5], None);
    }
}
