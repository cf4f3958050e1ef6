// Temperature model - linear CO₂ to global temperature mapping
use serde::Serialize;

/// Global mean temperature at the pre-industrial baseline, in °C
pub const BASE_TEMP_C: f64 = 14.0;

/// Pre-industrial atmospheric CO₂ concentration, in ppm
pub const PREINDUSTRIAL_CO2_PPM: f64 = 280.0;

/// Warming per ppm of CO₂ above the baseline, in °C/ppm
pub const SENSITIVITY_C_PER_PPM: f64 = 0.01;

const MODERATE_THRESHOLD_C: f64 = 15.0;
const CONCERNING_THRESHOLD_C: f64 = 16.0;
const CRITICAL_THRESHOLD_C: f64 = 17.0;

/// Projected temperature for a CO₂ level using the default model constants.
///
/// Defined for every real input; values outside the slider range are not clamped.
pub fn compute_temperature(co2_ppm: f64) -> f64 {
    BASE_TEMP_C + (co2_ppm - PREINDUSTRIAL_CO2_PPM) * SENSITIVITY_C_PER_PPM
}

/// Bucket a temperature into a severity class. Boundaries belong to the higher class.
pub fn classify_severity(temperature_c: f64) -> Severity {
    if temperature_c < MODERATE_THRESHOLD_C {
        Severity::Safe
    } else if temperature_c < CONCERNING_THRESHOLD_C {
        Severity::Moderate
    } else if temperature_c < CRITICAL_THRESHOLD_C {
        Severity::Concerning
    } else {
        Severity::Critical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Safe,
    Moderate,
    Concerning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Safe => "Safe",
            Severity::Moderate => "Moderate",
            Severity::Concerning => "Concerning",
            Severity::Critical => "Critical",
        }
    }

    /// Foreground color token used by the page stylesheet
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Safe => "text-accent",
            Severity::Moderate => "text-yellow-600",
            Severity::Concerning => "text-orange-600",
            Severity::Critical => "text-destructive",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Severity::Safe => "bg-accent/10",
            Severity::Moderate => "bg-yellow-50",
            Severity::Concerning => "bg-orange-50",
            Severity::Critical => "bg-destructive/10",
        }
    }
}

/// Affine CO₂ to temperature model with tunable constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureModel {
    pub base_temp_c: f64,
    pub preindustrial_co2_ppm: f64,
    pub sensitivity_c_per_ppm: f64,
}

impl Default for TemperatureModel {
    fn default() -> Self {
        Self {
            base_temp_c: BASE_TEMP_C,
            preindustrial_co2_ppm: PREINDUSTRIAL_CO2_PPM,
            sensitivity_c_per_ppm: SENSITIVITY_C_PER_PPM,
        }
    }
}

impl TemperatureModel {
    pub fn new(base_temp_c: f64, preindustrial_co2_ppm: f64, sensitivity_c_per_ppm: f64) -> Self {
        Self {
            base_temp_c,
            preindustrial_co2_ppm,
            sensitivity_c_per_ppm,
        }
    }

    pub fn temperature(&self, co2_ppm: f64) -> f64 {
        self.base_temp_c + (co2_ppm - self.preindustrial_co2_ppm) * self.sensitivity_c_per_ppm
    }

    pub fn reading(&self, co2_ppm: f64) -> TemperatureReading {
        let temperature_c = self.temperature(co2_ppm);
        TemperatureReading {
            co2_ppm,
            temperature_c,
            increase_c: temperature_c - self.base_temp_c,
            severity: classify_severity(temperature_c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub co2_ppm: f64,
    pub temperature_c: f64,
    /// Warming above the pre-industrial baseline
    pub increase_c: f64,
    pub severity: Severity,
}

impl TemperatureReading {
    /// "15.40°C"
    pub fn display_temperature(&self, fraction_digits: usize) -> String {
        format!("{:.*}°C", fraction_digits, self.temperature_c)
    }

    /// "+1.40°C"
    pub fn display_increase(&self, fraction_digits: usize) -> String {
        format!("+{:.*}°C", fraction_digits, self.increase_c)
    }
}
