//! Numeric routines over ascending-sorted per-template read counts.
//!
//! Every function here assumes its input is already sorted in ascending order;
//! the threshold counters rely on that to binary search instead of scanning.

use crate::error::{QuestError, QuestResult};

/// Summary of a sorted count array
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountSummary {
    pub total: u64,
    pub mean: f64,
    pub median: f64,
    pub gini: f64,
}

fn ensure_non_empty(sorted: &[u64], what: &str) -> QuestResult<()> {
    if sorted.is_empty() {
        return Err(QuestError::EmptyInput(format!("{}: empty array!", what)));
    }
    Ok(())
}

/// Median of a sorted array: the central element for odd lengths, the mean of
/// the two central elements for even lengths.
pub fn median(sorted: &[u64]) -> QuestResult<f64> {
    ensure_non_empty(sorted, "Median")?;

    let n = sorted.len();
    if n == 1 {
        return Ok(sorted[0] as f64);
    }

    if n % 2 == 0 {
        let i = n / 2;
        return Ok((sorted[i - 1] as f64 + sorted[i] as f64) / 2.0);
    }

    Ok(sorted[(n - 1) / 2] as f64)
}

/// Arithmetic mean of the counts
pub fn mean(sorted: &[u64]) -> QuestResult<f64> {
    ensure_non_empty(sorted, "Mean")?;
    let total: u64 = sorted.iter().sum();
    Ok(total as f64 / sorted.len() as f64)
}

/// Gini coefficient of a sorted non-negative sample.
///
/// `(2 * Σ a[i] * (i + 1) / m - (n + 1)) / d` where `m` is the sum of the
/// sample and `d` is `n`, or `n - 1` when `corrected` is set. A sample summing
/// to zero yields 0.
pub fn gini(sorted: &[u64], corrected: bool) -> QuestResult<f64> {
    ensure_non_empty(sorted, "Gini coefficient")?;

    let n = sorted.len();
    let total: u64 = sorted.iter().sum();
    if total == 0 {
        return Ok(0.0);
    }
    if corrected && n == 1 {
        return Ok(0.0);
    }

    let weighted: u128 = sorted
        .iter()
        .enumerate()
        .map(|(i, &count)| count as u128 * (i as u128 + 1))
        .sum();

    let denominator = if corrected { n - 1 } else { n };
    Ok((2.0 * weighted as f64 / total as f64 - (n as f64 + 1.0)) / denominator as f64)
}

/// Total, mean, median and (uncorrected unless asked) Gini coefficient in one go.
///
/// When the counts sum to zero every statistic is reported as zero.
pub fn summarize(sorted: &[u64], gini_corrected: bool) -> QuestResult<CountSummary> {
    ensure_non_empty(sorted, "Stats calculation")?;

    let total: u64 = sorted.iter().sum();
    if total == 0 {
        return Ok(CountSummary::default());
    }

    Ok(CountSummary {
        total,
        mean: total as f64 / sorted.len() as f64,
        median: median(sorted)?,
        gini: gini(sorted, gini_corrected)?,
    })
}

/// Number of elements strictly below `threshold`
pub fn count_below(sorted: &[u64], threshold: u64) -> usize {
    sorted.partition_point(|&count| count < threshold)
}

/// Number of elements equal to zero
pub fn count_zero(sorted: &[u64]) -> usize {
    sorted.partition_point(|&count| count == 0)
}
