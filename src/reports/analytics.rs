//! Aggregate statistics over record snapshots
//!
//! Every function is pure. An empty snapshot is reported as
//! [`RosterError::EmptyStore`] because means and extrema are undefined there.

use std::collections::BTreeMap;

use crate::error::{RosterError, RosterResult};
use crate::models::Record;

/// The record holding an extreme value
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub id: String,
    pub name: String,
    pub value: f64,
}

/// Count, sum, mean and extrema of one numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: Extreme,
    pub max: Extreme,
}

/// A half-open value band `[lower, upper)`; no upper bound means unbounded
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub label: String,
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Bin {
    pub fn new(label: impl Into<String>, lower: f64, upper: Option<f64>) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value < upper)
    }
}

/// Count for one bin or category
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
    /// Share of all records, 0-100, unrounded
    pub percentage: f64,
}

/// Records partitioned into buckets
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub total: usize,
    pub buckets: Vec<Bucket>,
    /// Records that fell into no bucket
    pub unbinned: usize,
}

/// Aggregate of one group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
}

fn ensure_not_empty<R: Record>(snapshot: &[R]) -> RosterResult<()> {
    if snapshot.is_empty() {
        Err(RosterError::EmptyStore(R::ENTITY))
    } else {
        Ok(())
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

fn extreme<R: Record>(record: &R, value: f64) -> Extreme {
    Extreme {
        id: record.id().to_string(),
        name: record.name().to_string(),
        value,
    }
}

/// Count, sum, mean, minimum and maximum of `value`
///
/// Ties for an extreme go to the first record in snapshot order.
pub fn summarize<R, F>(snapshot: &[R], value: F) -> RosterResult<Summary>
where
    R: Record,
    F: Fn(&R) -> f64,
{
    ensure_not_empty(snapshot)?;

    let first = &snapshot[0];
    let mut min = extreme(first, value(first));
    let mut max = min.clone();
    let mut sum = 0.0;

    for record in snapshot {
        let v = value(record);
        sum += v;
        if v < min.value {
            min = extreme(record, v);
        }
        if v > max.value {
            max = extreme(record, v);
        }
    }

    Ok(Summary {
        count: snapshot.len(),
        sum,
        mean: sum / snapshot.len() as f64,
        min,
        max,
    })
}

/// Check that bins are ordered, contiguous and non-overlapping
pub fn validate_bins(bins: &[Bin]) -> RosterResult<()> {
    for (i, bin) in bins.iter().enumerate() {
        if let Some(upper) = bin.upper {
            if !(bin.lower < upper) {
                return Err(RosterError::Validation(format!(
                    "Bin '{}' is empty or inverted",
                    bin.label
                )));
            }
        }
        if let Some(next) = bins.get(i + 1) {
            if bin.upper != Some(next.lower) {
                return Err(RosterError::Validation(format!(
                    "Bins '{}' and '{}' are not contiguous",
                    bin.label, next.label
                )));
            }
        }
    }
    Ok(())
}

/// Partition records into numeric bins
pub fn distribution<R, F>(snapshot: &[R], bins: &[Bin], value: F) -> RosterResult<Distribution>
where
    R: Record,
    F: Fn(&R) -> f64,
{
    ensure_not_empty(snapshot)?;
    validate_bins(bins)?;

    let mut counts = vec![0usize; bins.len()];
    let mut unbinned = 0;
    for record in snapshot {
        let v = value(record);
        match bins.iter().position(|b| b.contains(v)) {
            Some(i) => counts[i] += 1,
            None => unbinned += 1,
        }
    }

    let total = snapshot.len();
    Ok(Distribution {
        total,
        buckets: bins
            .iter()
            .zip(counts)
            .map(|(bin, count)| Bucket {
                label: bin.label.clone(),
                count,
                percentage: percentage(count, total),
            })
            .collect(),
        unbinned,
    })
}

/// Count records per category, in the order of `labels`
pub fn tally<R, F>(snapshot: &[R], labels: &[&str], key: F) -> RosterResult<Distribution>
where
    R: Record,
    F: Fn(&R) -> String,
{
    ensure_not_empty(snapshot)?;

    let mut counts = vec![0usize; labels.len()];
    let mut unbinned = 0;
    for record in snapshot {
        let k = key(record);
        match labels.iter().position(|l| *l == k) {
            Some(i) => counts[i] += 1,
            None => unbinned += 1,
        }
    }

    let total = snapshot.len();
    Ok(Distribution {
        total,
        buckets: labels
            .iter()
            .zip(counts)
            .map(|(label, count)| Bucket {
                label: label.to_string(),
                count,
                percentage: percentage(count, total),
            })
            .collect(),
        unbinned,
    })
}

/// Count, sum and mean of `value` per group, ordered by group key
pub fn group_by<R, K, V>(snapshot: &[R], key: K, value: V) -> RosterResult<Vec<GroupSummary>>
where
    R: Record,
    K: Fn(&R) -> String,
    V: Fn(&R) -> f64,
{
    ensure_not_empty(snapshot)?;

    let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for record in snapshot {
        let entry = groups.entry(key(record)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += value(record);
    }

    Ok(groups
        .into_iter()
        .map(|(key, (count, sum))| GroupSummary {
            key,
            count,
            sum,
            mean: sum / count as f64,
        })
        .collect())
}

/// Share of records satisfying `predicate`, 0-100
pub fn ratio<R, F>(snapshot: &[R], predicate: F) -> RosterResult<f64>
where
    R: Record,
    F: Fn(&R) -> bool,
{
    ensure_not_empty(snapshot)?;
    let hits = snapshot.iter().filter(|r| predicate(r)).count();
    Ok(percentage(hits, snapshot.len()))
}

/// Salary bands from ascending edges: below the first edge, between each
/// pair, and above the last
///
/// The below-first band is left out when the first edge is not positive.
pub fn bands_from_edges(edges: &[f64]) -> Vec<Bin> {
    let mut bins = Vec::with_capacity(edges.len() + 1);
    let Some(&first) = edges.first() else {
        bins.push(Bin::new("All", 0.0, None));
        return bins;
    };

    if first > 0.0 {
        bins.push(Bin::new(format!("Below {}", short_amount(first)), 0.0, Some(first)));
    }
    for pair in edges.windows(2) {
        bins.push(Bin::new(
            format!("{} - {}", short_amount(pair[0]), short_amount(pair[1])),
            pair[0],
            Some(pair[1]),
        ));
    }
    if let Some(&last) = edges.last() {
        bins.push(Bin::new(format!("Above {}", short_amount(last)), last, None));
    }
    bins
}

/// 30000 -> "30K", 1500000 -> "1.5M", 750 -> "750"
fn short_amount(amount: f64) -> String {
    let (scaled, suffix) = if amount >= 1_000_000.0 {
        (amount / 1_000_000.0, "M")
    } else if amount >= 1_000.0 {
        (amount / 1_000.0, "K")
    } else {
        (amount, "")
    };
    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}", text, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    fn staff() -> Vec<Employee> {
        vec![
            Employee::new("EMP001", "Asha", "Engineering", 72000.0),
            Employee::new("EMP002", "Bilal", "Sales", 30000.0),
            Employee::new("EMP003", "Chen", "Engineering", 48000.0),
            Employee::new("EMP004", "Dana", "Sales", 30000.0),
            Employee::new("EMP005", "Eli", "Admin", 120000.0),
        ]
    }

    #[test]
    fn test_summary() {
        let s = summarize(&staff(), |e| e.salary).unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.sum, 300000.0);
        assert_eq!(s.mean, 60000.0);
        assert_eq!(s.max.name, "Eli");
        // tie on the minimum goes to the first in store order
        assert_eq!(s.min.id, "EMP002");
        assert_eq!(s.min.value, 30000.0);
    }

    #[test]
    fn test_empty_snapshot_is_reported() {
        let empty: Vec<Employee> = Vec::new();
        assert!(matches!(
            summarize(&empty, |e| e.salary),
            Err(RosterError::EmptyStore("Employee"))
        ));
        assert!(matches!(
            distribution(&empty, &bands_from_edges(&[1.0]), |e| e.salary),
            Err(RosterError::EmptyStore(_))
        ));
        assert!(matches!(tally(&empty, &["A"], |e| e.name.clone()), Err(RosterError::EmptyStore(_))));
        assert!(matches!(
            group_by(&empty, |e| e.department.clone(), |e| e.salary),
            Err(RosterError::EmptyStore(_))
        ));
        assert!(matches!(ratio(&empty, |_| true), Err(RosterError::EmptyStore(_))));
    }

    #[test]
    fn test_salary_bands() {
        let bins = bands_from_edges(&[30000.0, 50000.0, 75000.0, 100000.0]);
        let labels: Vec<_> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Below 30K", "30K - 50K", "50K - 75K", "75K - 100K", "Above 100K"]
        );

        let dist = distribution(&staff(), &bins, |e| e.salary).unwrap();
        let counts: Vec<_> = dist.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, [0, 3, 1, 0, 1]);
        assert_eq!(dist.buckets[1].percentage, 60.0);
        assert_eq!(dist.unbinned, 0);
    }

    #[test]
    fn test_zero_first_edge_has_no_below_band() {
        let bins = bands_from_edges(&[0.0, 50000.0]);
        let labels: Vec<_> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["0 - 50K", "Above 50K"]);

        let dist = distribution(&staff(), &bins, |e| e.salary).unwrap();
        let counts: Vec<_> = dist.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, [3, 2]);
    }

    #[test]
    fn test_values_outside_bins_are_counted() {
        let bins = vec![Bin::new("low", 0.0, Some(50000.0))];
        let dist = distribution(&staff(), &bins, |e| e.salary).unwrap();
        assert_eq!(dist.buckets[0].count, 3);
        assert_eq!(dist.unbinned, 2);
    }

    #[test]
    fn test_bad_bins_rejected() {
        let gap = vec![Bin::new("a", 0.0, Some(10.0)), Bin::new("b", 20.0, None)];
        assert!(validate_bins(&gap).unwrap_err().is_validation());

        let inverted = vec![Bin::new("a", 10.0, Some(5.0))];
        assert!(validate_bins(&inverted).is_err());

        let open_middle = vec![Bin::new("a", 0.0, None), Bin::new("b", 5.0, None)];
        assert!(validate_bins(&open_middle).is_err());
    }

    #[test]
    fn test_tally_keeps_label_order() {
        let dist = tally(&staff(), &["Sales", "Engineering"], |e| e.department.clone()).unwrap();
        assert_eq!(dist.buckets[0].label, "Sales");
        assert_eq!(dist.buckets[0].count, 2);
        assert_eq!(dist.buckets[1].count, 2);
        assert_eq!(dist.unbinned, 1);
        assert_eq!(dist.total, 5);
    }

    #[test]
    fn test_group_by_department() {
        let groups = group_by(&staff(), |e| e.department.clone(), |e| e.salary).unwrap();
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Admin", "Engineering", "Sales"]);
        assert_eq!(groups[1].mean, 60000.0);
        assert_eq!(groups[2].count, 2);
    }

    #[test]
    fn test_ratio() {
        let share = ratio(&staff(), |e| e.salary >= 48000.0).unwrap();
        assert_eq!(share, 60.0);
    }

    #[test]
    fn test_short_amounts() {
        assert_eq!(short_amount(30000.0), "30K");
        assert_eq!(short_amount(1_500_000.0), "1.5M");
        assert_eq!(short_amount(750.0), "750");
        assert_eq!(short_amount(12_500.0), "12.5K");
    }
}
