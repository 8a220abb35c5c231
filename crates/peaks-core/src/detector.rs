use serde::Serialize;

use crate::error::DetectError;
use crate::extrema::local_maxima;
use crate::properties::{measure, Properties};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Peak,
    Valley,
}

/// One retained peak or valley.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremum {
    pub index: usize,
    pub kind: ExtremumKind,
    pub properties: Properties,
}

/// Everything a single detection run derived from its input.
///
/// `peaks` and `valleys` hold the extrema whose prominence reached the
/// threshold, each in ascending index order. `poi` is their merged index
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub series: Vec<f64>,
    pub inverted: Vec<f64>,
    pub threshold: f64,
    pub peaks: Vec<Extremum>,
    pub valleys: Vec<Extremum>,
    pub poi: Vec<usize>,
}

impl Detection {
    /// Retained peaks and valleys, tagged, in ascending index order.
    pub fn points(&self) -> Vec<&Extremum> {
        let mut points: Vec<&Extremum> = self.peaks.iter().chain(&self.valleys).collect();
        points.sort_unstable_by_key(|e| e.index);
        points
    }

    pub fn is_empty(&self) -> bool {
        self.poi.is_empty()
    }
}

/// Detect peaks and valleys of `series` whose prominence is at least `threshold`.
///
/// Valleys are the peaks of the negated series, so both kinds go through the
/// same maximum search and are filtered independently against the same
/// threshold.
pub fn detect(series: &[f64], threshold: f64) -> Result<Detection, DetectError> {
    validate(series, threshold)?;

    let inverted: Vec<f64> = series.iter().map(|x| -x).collect();
    let peaks = retained(series, threshold, ExtremumKind::Peak);
    let valleys = retained(&inverted, threshold, ExtremumKind::Valley);

    let mut poi: Vec<usize> = peaks.iter().chain(&valleys).map(|e| e.index).collect();
    poi.sort_unstable();

    Ok(Detection {
        series: series.to_vec(),
        inverted,
        threshold,
        peaks,
        valleys,
        poi,
    })
}

fn validate(series: &[f64], threshold: f64) -> Result<(), DetectError> {
    if series.is_empty() {
        return Err(DetectError::EmptySeries);
    }
    if let Some((index, &value)) = series.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(DetectError::NonFiniteSample { index, value });
    }
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(DetectError::InvalidThreshold(threshold));
    }
    Ok(())
}

fn retained(data: &[f64], threshold: f64, kind: ExtremumKind) -> Vec<Extremum> {
    local_maxima(data)
        .iter()
        .map(|max| Extremum {
            index: max.index,
            kind,
            properties: measure(data, max),
        })
        .filter(|e| e.properties.prominence >= threshold)
        .collect()
}
