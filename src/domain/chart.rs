// Chart data domain models - sampled temperature curve across the CO₂ domain
use super::temperature::{TemperatureModel, TemperatureReading};
use thiserror::Error;

pub const DEFAULT_MIN_PPM: f64 = 280.0;
pub const DEFAULT_MAX_PPM: f64 = 500.0;
pub const DEFAULT_STEP_PPM: f64 = 10.0;

/// Upper bound on the sweep size
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("sample step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("sample bounds must be finite")]
    NonFiniteBounds,
    #[error("sample minimum {min} exceeds maximum {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("sample sweep would exceed the maximum number of points")]
    TooManySamples,
}

/// The swept CO₂ range. Samples sit at `min + i * step`, so both
/// endpoints are included whenever `max - min` is a multiple of `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleDomain {
    min: f64,
    max: f64,
    step: f64,
}

impl Default for SampleDomain {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PPM,
            max: DEFAULT_MAX_PPM,
            step: DEFAULT_STEP_PPM,
        }
    }
}

impl SampleDomain {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ChartError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::NonFiniteBounds);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ChartError::NonPositiveStep(step));
        }
        if min > max {
            return Err(ChartError::InvertedBounds { min, max });
        }
        let intervals = (max - min) / step;
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return Err(ChartError::TooManySamples);
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples in the sweep; (500 - 280) / 10 + 1 = 23 for the default domain
    pub fn len(&self) -> usize {
        // Small epsilon keeps 220/10 from landing on 21.999...
        ((self.max - self.min) / self.step + 1e-9).floor() as usize + 1
    }

    /// A validated domain always holds at least `min`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lazy sweep of the ppm values. Calling it again restarts from `min`.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }

    fn point(&self, index: usize) -> f64 {
        (self.min + index as f64 * self.step).min(self.max)
    }

    /// Index of the sample nearest to a live CO₂ level.
    ///
    /// Rounds half up on the step grid anchored at `min` (425 -> 430), then
    /// clamps into the sweep so every finite level marks exactly one sample.
    pub fn nearest_index(&self, co2_ppm: f64) -> usize {
        let last = self.len() - 1;
        let raw = ((co2_ppm - self.min) / self.step + 0.5).floor();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else if raw >= last as f64 {
            last
        } else {
            raw as usize
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSample {
    pub co2_ppm: f64,
    pub temperature_c: f64,
    pub is_current: bool,
}

/// Sweep the domain through the model and flag the sample nearest `live_co2_ppm`
pub fn generate_samples(
    domain: &SampleDomain,
    model: &TemperatureModel,
    live_co2_ppm: f64,
) -> Vec<ChartSample> {
    let current = domain.nearest_index(live_co2_ppm);
    domain
        .points()
        .enumerate()
        .map(|(i, co2_ppm)| ChartSample {
            co2_ppm,
            temperature_c: model.temperature(co2_ppm),
            is_current: i == current,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Area,
}

/// Everything the page needs to draw the temperature vs CO₂ chart
#[derive(Debug, Clone)]
pub struct TemperatureChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub y_min: f64,
    pub y_max: f64,
    pub fraction_digits: usize,
    pub samples: Vec<ChartSample>,
    pub current: TemperatureReading,
}

impl TemperatureChart {
    pub fn new(
        samples: Vec<ChartSample>,
        current: TemperatureReading,
        y_min: f64,
        y_max: f64,
        fraction_digits: usize,
    ) -> Self {
        Self {
            title: "Temperature vs CO₂ Relationship".to_string(),
            x_label: "CO₂ (ppm)".to_string(),
            y_label: "Temp (°C)".to_string(),
            kind: ChartKind::Area,
            y_min,
            y_max,
            fraction_digits,
            samples,
            current,
        }
    }

    pub fn current_sample(&self) -> Option<&ChartSample> {
        self.samples.iter().find(|s| s.is_current)
    }
}
