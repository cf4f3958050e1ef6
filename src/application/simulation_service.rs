// Simulation service - Use cases for readings, chart data and reference markers
use crate::domain::chart::{generate_samples, SampleDomain, TemperatureChart};
use crate::domain::reference::{reference_levels, ReferenceLevel};
use crate::domain::temperature::{TemperatureModel, TemperatureReading};
use crate::infrastructure::config::ChartSettings;

#[derive(Clone)]
pub struct SimulationService {
    model: TemperatureModel,
    domain: SampleDomain,
    chart_settings: ChartSettings,
}

impl SimulationService {
    pub fn new(model: TemperatureModel, domain: SampleDomain, chart_settings: ChartSettings) -> Self {
        Self {
            model,
            domain,
            chart_settings,
        }
    }

    pub fn model(&self) -> &TemperatureModel {
        &self.model
    }

    pub fn reading(&self, co2_ppm: f64) -> TemperatureReading {
        self.model.reading(co2_ppm)
    }

    /// Full redraw of the chart for the live CO₂ level
    pub fn chart(&self, co2_ppm: f64) -> TemperatureChart {
        let samples = generate_samples(&self.domain, &self.model, co2_ppm);
        tracing::debug!("Generated {} chart samples for {} ppm", samples.len(), co2_ppm);

        TemperatureChart::new(
            samples,
            self.model.reading(co2_ppm),
            self.chart_settings.y_min,
            self.chart_settings.y_max,
            self.chart_settings.fraction_digits,
        )
    }

    pub fn reference_levels(&self) -> Vec<ReferenceLevel> {
        reference_levels(&self.model)
    }

    pub fn fraction_digits(&self) -> usize {
        self.chart_settings.fraction_digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::temperature::Severity;

    fn service() -> SimulationService {
        SimulationService::new(
            TemperatureModel::default(),
            SampleDomain::default(),
            ChartSettings::default(),
        )
    }

    #[test]
    fn test_reading() {
        let reading = service().reading(500.0);
        assert_eq!(reading.severity, Severity::Concerning);
    }

    #[test]
    fn test_chart_redraws_for_each_level() {
        let service = service();
        let before = service.chart(420.0);
        let after = service.chart(425.0);

        assert_eq!(before.samples.len(), 23);
        assert_eq!(before.current_sample().map(|s| s.co2_ppm), Some(420.0));
        assert_eq!(after.current_sample().map(|s| s.co2_ppm), Some(430.0));
        assert_eq!(after.current.co2_ppm, 425.0);
        assert_eq!((after.y_min, after.y_max), (13.5, 16.5));
    }
}
