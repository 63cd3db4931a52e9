//! diagnostics::plots — data behind the three fitted-mixture plots.
//!
//! Purpose
//! -------
//! Produce renderer-agnostic plot descriptions ([`PlotData`]) for
//! - the mixture density overlay (histogram + weighted components + mixture),
//! - the probability–probability plot,
//! - the quantile–quantile plot.
//!
//! Rendering is left to whoever consumes the report; this module only
//! computes coordinates.
//!
//! Conventions
//! -----------
//! - Plotting positions are `(i + 0.5) / n` for the i-th order statistic.
//! - Histograms are density-normalized with `⌈√n⌉` bins, clamped to
//!   `[MIN_BINS, MAX_BINS]`.
use crate::mixture::{core::distribution::FittedMixture, errors::MixtureResult};
use serde::Serialize;

/// Points on each density curve.
pub const CURVE_POINTS: usize = 200;
pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 100;

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bars,
    Line,
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub kind: SeriesKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Renderer-agnostic description of one figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// Density histogram of `sorted` with the weighted component densities and
/// the mixture density on a common grid.
pub fn mixture_plot(sorted: &[f64], fitted: &FittedMixture, title: &str) -> PlotData {
    let mut series = Vec::with_capacity(fitted.modes().len() + 2);
    if let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) {
        series.push(histogram(sorted, lo, hi));

        let grid = linspace(lo, hi, CURVE_POINTS);
        for (k, (w, mode)) in fitted.mix().iter().zip(fitted.modes()).enumerate() {
            series.push(Series {
                label: format!("Mode {}", k + 1),
                kind: SeriesKind::Line,
                x: grid.clone(),
                y: grid.iter().map(|&x| w * mode.pdf(x)).collect(),
            });
        }
        series.push(Series {
            label: "Mixture".to_string(),
            kind: SeriesKind::Line,
            y: grid.iter().map(|&x| fitted.pdf(x)).collect(),
            x: grid,
        });
    }
    PlotData {
        title: title.to_string(),
        x_label: "B-factor".to_string(),
        y_label: "Density".to_string(),
        series,
    }
}

/// Empirical plotting positions against the fitted CDF at the sorted data.
pub fn pp_plot(sorted: &[f64], fitted: &FittedMixture, title: &str) -> PlotData {
    let positions = plotting_positions(sorted.len());
    let fitted_cdf = sorted.iter().map(|&x| fitted.cdf(x)).collect();
    PlotData {
        title: title.to_string(),
        x_label: "Empirical probability".to_string(),
        y_label: "Fitted probability".to_string(),
        series: vec![
            Series {
                label: "Observed".to_string(),
                kind: SeriesKind::Points,
                x: positions,
                y: fitted_cdf,
            },
            diagonal(0.0, 1.0),
        ],
    }
}

/// Fitted mixture quantiles at the plotting positions against the sorted
/// data.
///
/// Errors
/// ------
/// - Propagates quantile failures from [`FittedMixture::ppf`].
pub fn qq_plot(sorted: &[f64], fitted: &FittedMixture, title: &str) -> MixtureResult<PlotData> {
    let theoretical = plotting_positions(sorted.len())
        .into_iter()
        .map(|p| fitted.ppf(p))
        .collect::<MixtureResult<Vec<f64>>>()?;
    let mut series = vec![Series {
        label: "Observed".to_string(),
        kind: SeriesKind::Points,
        x: theoretical,
        y: sorted.to_vec(),
    }];
    if let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) {
        series.push(diagonal(lo, hi));
    }
    Ok(PlotData {
        title: title.to_string(),
        x_label: "Fitted quantile".to_string(),
        y_label: "Observed quantile".to_string(),
        series,
    })
}

// ---- Helper methods ----

fn plotting_positions(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect()
}

fn diagonal(lo: f64, hi: f64) -> Series {
    Series { label: "y = x".to_string(), kind: SeriesKind::Line, x: vec![lo, hi], y: vec![lo, hi] }
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 || hi <= lo {
        return vec![lo; n.max(1)];
    }
    let h = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + i as f64 * h).collect()
}

fn histogram(sorted: &[f64], lo: f64, hi: f64) -> Series {
    let n = sorted.len();
    let bins = ((n as f64).sqrt().ceil() as usize).clamp(MIN_BINS, MAX_BINS);
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };
    let mut counts = vec![0usize; bins];
    for &x in sorted {
        let idx = (((x - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let scale = 1.0 / (n as f64 * width);
    Series {
        label: "Observed".to_string(),
        kind: SeriesKind::Bars,
        x: (0..bins).map(|b| lo + (b as f64 + 0.5) * width).collect(),
        y: counts.into_iter().map(|c| c as f64 * scale).collect(),
    }
}
