// Mapper to convert domain models to JSON response bodies
use crate::domain::chart::{ChartKind, ChartSample, TemperatureChart};
use crate::domain::netlogo::NetLogoModel;
use crate::domain::reference::ReferenceLevel;
use crate::domain::temperature::{Severity, TemperatureReading};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SeverityDto {
    pub class: Severity,
    pub label: &'static str,
    pub color: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadingDto {
    pub co2_ppm: f64,
    pub temperature_c: f64,
    pub increase_c: f64,
    pub display: String,
    pub increase_display: String,
    pub severity: SeverityDto,
}

#[derive(Debug, Serialize)]
pub struct SampleDto {
    pub co2_ppm: f64,
    pub temperature_c: f64,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct ChartDto {
    pub title: String,
    pub kind: &'static str,
    pub x_label: String,
    pub y_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub samples: Vec<SampleDto>,
    pub current: ReadingDto,
}

#[derive(Debug, Serialize)]
pub struct ReferenceLevelDto {
    pub label: String,
    pub co2_ppm: f64,
    pub note: String,
    pub reading: ReadingDto,
}

#[derive(Debug, Serialize)]
pub struct ReferenceLevelsDto {
    pub levels: Vec<ReferenceLevelDto>,
    pub paris_goal_c: f64,
    pub paris_goal_co2_ppm: f64,
}

#[derive(Debug, Serialize)]
pub struct CommandsSentDto {
    pub commands_sent: usize,
}

#[derive(Debug, Serialize)]
pub struct ModelCatalogDto<'a> {
    pub models: &'a [NetLogoModel],
}

pub fn severity_to_dto(severity: Severity) -> SeverityDto {
    SeverityDto {
        class: severity,
        label: severity.label(),
        color: severity.color(),
        background: severity.background(),
    }
}

pub fn reading_to_dto(reading: &TemperatureReading, fraction_digits: usize) -> ReadingDto {
    ReadingDto {
        co2_ppm: reading.co2_ppm,
        temperature_c: reading.temperature_c,
        increase_c: reading.increase_c,
        display: reading.display_temperature(fraction_digits),
        increase_display: reading.display_increase(fraction_digits),
        severity: severity_to_dto(reading.severity),
    }
}

pub fn chart_to_dto(chart: TemperatureChart) -> ChartDto {
    let kind = match chart.kind {
        ChartKind::Area => "area",
    };

    let current = reading_to_dto(&chart.current, chart.fraction_digits);
    let digits = chart.fraction_digits;
    let samples = chart
        .samples
        .into_iter()
        .map(|s| sample_to_dto(s, digits))
        .collect();

    ChartDto {
        title: chart.title,
        kind,
        x_label: chart.x_label,
        y_label: chart.y_label,
        y_min: chart.y_min,
        y_max: chart.y_max,
        samples,
        current,
    }
}

// Plot values carry display precision so tooltips match the readout
fn sample_to_dto(sample: ChartSample, fraction_digits: usize) -> SampleDto {
    SampleDto {
        co2_ppm: sample.co2_ppm,
        temperature_c: round_to(sample.temperature_c, fraction_digits),
        current: sample.is_current,
    }
}

pub fn reference_to_dto(level: ReferenceLevel, fraction_digits: usize) -> ReferenceLevelDto {
    ReferenceLevelDto {
        reading: reading_to_dto(&level.reading, fraction_digits),
        label: level.label,
        co2_ppm: level.co2_ppm,
        note: level.note,
    }
}

fn round_to(value: f64, fraction_digits: usize) -> f64 {
    let factor = 10f64.powi(fraction_digits as i32);
    (value * factor).round() / factor
}
