// Historical and projected CO₂ markers shown alongside the simulator
use super::temperature::{TemperatureModel, TemperatureReading};

pub const PARIS_GOAL_WARMING_C: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct ReferenceLevel {
    pub label: String,
    pub co2_ppm: f64,
    pub note: String,
    pub reading: TemperatureReading,
}

pub fn reference_levels(model: &TemperatureModel) -> Vec<ReferenceLevel> {
    [
        ("Pre-industrial", model.preindustrial_co2_ppm, "Baseline CO₂ level before the industrial revolution (1750)"),
        ("Current", 420.0, "Highest CO₂ concentration in human history (2024)"),
        ("Projected", 500.0, "Projected level if emissions continue unchecked"),
    ]
    .into_iter()
    .map(|(label, co2_ppm, note)| ReferenceLevel {
        label: label.to_string(),
        co2_ppm,
        note: note.to_string(),
        reading: model.reading(co2_ppm),
    })
    .collect()
}

/// CO₂ level at which the model crosses the Paris Agreement warming goal
pub fn paris_goal_co2_ppm(model: &TemperatureModel) -> f64 {
    model.preindustrial_co2_ppm + PARIS_GOAL_WARMING_C / model.sensitivity_c_per_ppm
}
