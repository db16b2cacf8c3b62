//! Correlation engine: pairwise Pearson correlation over enriched records.
//!
//! Statistics are population statistics (divide by n). Pearson r is the
//! same under the n and n-1 conventions, so the matrix matches the usual
//! sample-based tools.
//!
//! Observations are pairwise-complete: a year where either metric is
//! Undefined is skipped for that pair only. A pair with fewer than two
//! usable years, or with a constant side, is Undefined. Undefined cells are
//! never coerced to 0 or 1.

use crate::{
    enrich::EnrichedYearRecord,
    error::{EngineError, EngineResult},
    metric::Metric,
    types::MetricValue,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Square, symmetric matrix indexed by an ordered list of metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<Metric>,
    /// Row-major, `columns.len()` rows of `columns.len()` cells.
    cells:   Vec<Vec<MetricValue>>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[Metric] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<MetricValue>] {
        &self.cells
    }

    /// Cell by position. Panics on out-of-range indices, like slice indexing.
    pub fn at(&self, i: usize, j: usize) -> MetricValue {
        self.cells[i][j]
    }

    /// Cell by metric pair.
    pub fn get(&self, a: Metric, b: Metric) -> EngineResult<MetricValue> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.cells[i][j])
    }

    /// Columns whose diagonal is Undefined (constant, or fewer than two values).
    pub fn undefined_columns(&self) -> Vec<Metric> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| self.cells[*i][*i].is_undefined())
            .map(|(_, m)| *m)
            .collect()
    }

    fn index_of(&self, metric: Metric) -> EngineResult<usize> {
        self.columns
            .iter()
            .position(|m| *m == metric)
            .ok_or_else(|| EngineError::not_found(format!("Column '{metric}' in correlation matrix")))
    }
}

/// Compute the full correlation matrix of `columns` over `records`.
pub fn correlation_matrix(
    records: &[EnrichedYearRecord],
    columns: &[Metric],
) -> EngineResult<CorrelationMatrix> {
    check_columns(columns)?;

    let series: Vec<Vec<MetricValue>> = columns
        .iter()
        .map(|&m| records.iter().map(|r| r.value(m)).collect())
        .collect();

    let n = columns.len();
    let mut cells = vec![vec![MetricValue::Undefined; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                self_correlation(&series[i])
            } else {
                pearson(&series[i], &series[j])
            };
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    let matrix = CorrelationMatrix { columns: columns.to_vec(), cells };
    let undefined = matrix.undefined_columns();
    if !undefined.is_empty() {
        log::warn!("correlation undefined for constant or sparse columns: {undefined:?}");
    }
    log::debug!("correlation matrix computed: {n}x{n} over {} records", records.len());
    Ok(matrix)
}

fn check_columns(columns: &[Metric]) -> EngineResult<()> {
    if columns.len() < 2 {
        return Err(EngineError::invalid_argument(format!(
            "correlation needs at least 2 columns, got {}",
            columns.len()
        )));
    }
    let mut seen = HashSet::new();
    for metric in columns {
        if !seen.insert(*metric) {
            return Err(EngineError::invalid_argument(format!(
                "column '{metric}' requested more than once"
            )));
        }
    }
    Ok(())
}

fn self_correlation(xs: &[MetricValue]) -> MetricValue {
    let values: Vec<f64> = xs.iter().filter_map(|v| v.as_f64()).collect();
    if values.len() < 2 || is_constant(&values) {
        MetricValue::Undefined
    } else {
        MetricValue::Value(1.0)
    }
}

/// Pearson r over the years where both sides are defined.
fn pearson(xs: &[MetricValue], ys: &[MetricValue]) -> MetricValue {
    let (x, y): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
        .unzip();

    if x.len() < 2 || is_constant(&x) || is_constant(&y) {
        return MetricValue::Undefined;
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(&y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return MetricValue::Undefined;
    }
    MetricValue::Value((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Relative spread below which a column counts as constant.
const CONSTANT_TOLERANCE: f64 = 1e-12;

/// Zero variance up to rounding noise: a ratio that is exactly 3 in every
/// year may still come out as 2.9999999999999996 in some of them.
fn is_constant(values: &[f64]) -> bool {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    max - min <= CONSTANT_TOLERANCE * max.abs().max(min.abs()).max(1.0)
}

// ── Ranking ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedPair {
    pub metric_a:    Metric,
    pub metric_b:    Metric,
    pub correlation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Perfect,    // |r| >= 0.9995
    VeryStrong, // |r| >= 0.9
    Strong,     // |r| >= 0.7
    Moderate,   // |r| >= 0.4
    Weak,
}

impl RankedPair {
    pub fn strength(&self) -> Strength {
        let r = self.correlation.abs();
        if r >= 0.9995 {
            Strength::Perfect
        } else if r >= 0.9 {
            Strength::VeryStrong
        } else if r >= 0.7 {
            Strength::Strong
        } else if r >= 0.4 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn is_inverse(&self) -> bool {
        self.correlation < 0.0
    }
}

/// Strongest off-diagonal relationships, strongest first.
///
/// Upper triangle only, Undefined cells skipped. Each pair is labelled with
/// the smaller metric name as `metric_a`; equal strengths are ordered by that
/// name pair, so the output does not depend on the requested column order.
pub fn rank_pairs(matrix: &CorrelationMatrix, top_n: usize) -> EngineResult<Vec<RankedPair>> {
    if top_n < 1 {
        return Err(EngineError::invalid_argument("top_n must be at least 1"));
    }
    if matrix.columns.len() < 2 {
        return Err(EngineError::invalid_argument(
            "ranking needs a matrix with at least 2 columns",
        ));
    }

    let n = matrix.columns.len();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            if let MetricValue::Value(r) = matrix.cells[i][j] {
                let (metric_a, metric_b) = canonical_pair(matrix.columns[i], matrix.columns[j]);
                pairs.push(RankedPair { metric_a, metric_b, correlation: r });
            }
        }
    }

    pairs.sort_by(compare_ranked);
    pairs.truncate(top_n);
    Ok(pairs)
}

/// Smaller name first, so a pair reads the same whatever the column order.
fn canonical_pair(a: Metric, b: Metric) -> (Metric, Metric) {
    if a.name() <= b.name() {
        (a, b)
    } else {
        (b, a)
    }
}

fn compare_ranked(a: &RankedPair, b: &RankedPair) -> Ordering {
    b.correlation
        .abs()
        .total_cmp(&a.correlation.abs())
        .then_with(|| {
            (a.metric_a.name(), a.metric_b.name()).cmp(&(b.metric_a.name(), b.metric_b.name()))
        })
}
