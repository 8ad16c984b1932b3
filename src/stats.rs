use serde::Serialize;

/// Sum of the values, `0.0` for an empty slice.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean of the values. Returns `None` for empty datasets.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(sum(data) / data.len() as f64)
}

/// Calculates a quantile from the data using linear interpolation.
///
/// The quantile is located at `q * (n - 1)` in the sorted data and interpolated
/// between the two closest ranks.
///
/// # Arguments
///
/// * `data` - Slice of values to analyze
/// * `q` - Desired quantile as a fraction (0.0 to 1.0)
///
/// # Returns
///
/// Returns the quantile value, or `None` for empty datasets.
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut sorted_data = data.to_vec();
    sorted_data.sort_by(f64::total_cmp);

    let index = q.clamp(0.0, 1.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted_data[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight)
    }
}

/// Ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; `None` when every `y` is identical
    pub r_squared: Option<f64>,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a line through the points by minimising squared vertical residuals.
///
/// Returns `None` with fewer than two points or when every `x` is identical,
/// since the slope is undefined in both cases.
pub fn linear_regression(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let syy: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = (syy > 0.0).then(|| (sxy * sxy) / (sxx * syy));

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// One equal-width histogram bin. The upper edge is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Splits `[min, max]` of the data into `bins` equal-width bins and counts values.
///
/// All-equal data collapses to a single bin of width zero. Empty data yields no bins.
pub fn histogram(data: &[f64], bins: usize) -> Vec<Bin> {
    if data.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![Bin {
            start: min,
            end: max,
            count: data.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &x in data {
        let idx = (((x - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: min + width * i as f64,
            end: if i == bins - 1 {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}
