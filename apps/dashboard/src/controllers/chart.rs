use crate::domain::TimeRange;
use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const BASE_TEMPERATURE: f64 = 24.5;
pub const TEMPERATURE_SPREAD: f64 = 4.0;

/// Keys searched, in order, for a numeric series in a climate-data response.
const SERIES_KEYS: [&str; 3] = ["values", "temperatures", "temperature"];

/// Labeled temperature series. Labels and values always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    fn paired(mut labels: Vec<String>, mut values: Vec<f64>) -> Self {
        let len = labels.len().min(values.len());
        labels.truncate(len);
        values.truncate(len);
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(x, y)` pairs with x as the day index, ready for a line dataset.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as f64, *value))
            .collect()
    }
}

/// The charting surface the controller redraws.
pub trait ChartWidget {
    fn redraw(&mut self, series: &ChartSeries);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartDataError {
    #[error("climate payload has no numeric series")]
    MissingSeries,
    #[error("climate payload value at index {index} is not a number")]
    NotNumeric { index: usize },
}

/// One label per day, oldest first, ending with `today` (e.g. `Oct 19`).
pub fn date_labels(today: NaiveDate, count: usize) -> Vec<String> {
    (0..count as u64)
        .rev()
        .filter_map(|days_back| today.checked_sub_days(Days::new(days_back)))
        .map(|day| day.format("%b %-d").to_string())
        .collect()
}

pub fn synthetic_values(rng: &mut impl Rng, count: usize) -> Vec<f64> {
    (0..count)
        .map(|_| BASE_TEMPERATURE + rng.gen_range(-TEMPERATURE_SPREAD..=TEMPERATURE_SPREAD))
        .collect()
}

fn extract_series(payload: &Value) -> Result<&Vec<Value>, ChartDataError> {
    if let Value::Array(values) = payload {
        return Ok(values);
    }
    SERIES_KEYS
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_array))
        .ok_or(ChartDataError::MissingSeries)
}

pub struct ChartController {
    widget: Box<dyn ChartWidget>,
    rng: StdRng,
    range: TimeRange,
    series: ChartSeries,
}

impl std::fmt::Debug for ChartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartController")
            .field("range", &self.range)
            .field("points", &self.series.len())
            .finish_non_exhaustive()
    }
}

impl ChartController {
    pub fn new(widget: Box<dyn ChartWidget>) -> Self {
        Self::with_rng(widget, StdRng::from_entropy())
    }

    pub fn with_rng(widget: Box<dyn ChartWidget>, rng: StdRng) -> Self {
        Self {
            widget,
            rng,
            range: TimeRange::Month,
            series: ChartSeries::default(),
        }
    }

    /// Draws the initial series for `range`.
    pub fn initialize(&mut self, range: TimeRange) {
        self.set_range_on(range, Local::now().date_naive());
    }

    /// Regenerates the series for a range token; unknown tokens select 30 days.
    pub fn set_range(&mut self, token: &str) -> TimeRange {
        let range = TimeRange::parse(token);
        self.set_range_on(range, Local::now().date_naive());
        range
    }

    pub fn set_range_on(&mut self, range: TimeRange, today: NaiveDate) {
        let count = range.point_count();
        let labels = date_labels(today, count);
        let values = synthetic_values(&mut self.rng, count);

        self.range = range;
        self.series = ChartSeries::paired(labels, values);
        self.widget.redraw(&self.series);
        tracing::debug!(range = range.token(), points = self.series.len(), "chart regenerated");
    }

    /// Replaces the synthetic values with a series from a climate-data response,
    /// keeping at most the newest points of the current range.
    pub fn apply_climate_payload(
        &mut self,
        payload: &Value,
        today: NaiveDate,
    ) -> Result<usize, ChartDataError> {
        let raw = extract_series(payload)?;
        let values = raw
            .iter()
            .enumerate()
            .map(|(index, value)| value.as_f64().ok_or(ChartDataError::NotNumeric { index }))
            .collect::<Result<Vec<f64>, _>>()?;
        if values.is_empty() {
            return Err(ChartDataError::MissingSeries);
        }

        let keep = values.len().min(self.range.point_count());
        let newest = values[values.len() - keep..].to_vec();
        self.series = ChartSeries::paired(date_labels(today, keep), newest);
        self.widget.redraw(&self.series);
        Ok(self.series.len())
    }

    pub const fn range(&self) -> TimeRange {
        self.range
    }

    pub const fn series(&self) -> &ChartSeries {
        &self.series
    }
}
