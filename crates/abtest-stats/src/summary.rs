use serde::Serialize;

use crate::{descriptive::DescriptiveStats, percentiles::Percentiles};

/// Quartile points reported in a column summary.
pub const QUARTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

/// Per-column summary combining descriptive statistics and quartiles.
///
/// Mirrors the classic "describe" table of a data frame: count, mean, standard
/// deviation, minimum, 25%/50%/75% quartiles and maximum.
///
/// # Examples
///
/// ```
/// use abtest_stats::summary::SummaryStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let summary = SummaryStats::new(values).unwrap();
///
/// assert_eq!(summary.stats.mean, 5.5);
/// assert_eq!(summary.q1(), 3.25);
/// assert_eq!(summary.q3(), 7.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Basic descriptive statistics for the column.
    pub stats: DescriptiveStats,
    /// Quartile values, see [`QUARTILE_POINTS`].
    pub quartiles: Percentiles,
}

impl SummaryStats {
    /// Computes the summary from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let quartiles = Percentiles::from_sorted(sorted_values, &QUARTILE_POINTS);
        Some(Self { stats, quartiles })
    }

    #[must_use]
    pub fn q1(&self) -> f64 {
        self.quartiles.get(25.0).unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn q2(&self) -> f64 {
        self.quartiles.get(50.0).unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn q3(&self) -> f64 {
        self.quartiles.get(75.0).unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(SummaryStats::new([]).is_none());
    }

    #[test]
    fn test_impression_column() {
        let values = [
            82529.0, 98050.0, 82696.0, 109_914.0, 108_458.0, 77774.0, 95110.0, 106_649.0,
            122_709.0, 79498.0,
        ];
        let summary = SummaryStats::new(values).unwrap();
        assert_eq!(summary.stats.count, 10);
        assert!((summary.stats.mean - 96338.7).abs() < 1e-6);
        assert!((summary.stats.std_dev - 15428.645_083_811_547).abs() < 1e-6);
        assert!((summary.q1() - 82570.75).abs() < 1e-9);
        assert!((summary.q2() - 96580.0).abs() < 1e-9);
        assert!((summary.q3() - 108_005.75).abs() < 1e-9);
        assert_eq!(summary.stats.min, 77774.0);
        assert_eq!(summary.stats.max, 122_709.0);
    }

    #[test]
    fn test_median_matches_q2() {
        let summary = SummaryStats::new([9.0, 2.0, 7.0, 4.0]).unwrap();
        assert_eq!(summary.stats.median, summary.q2());
    }
}
