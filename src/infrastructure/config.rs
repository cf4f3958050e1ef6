use crate::domain::chart::{
    ChartError, SampleDomain, DEFAULT_MAX_PPM, DEFAULT_MIN_PPM, DEFAULT_STEP_PPM,
};
use crate::domain::netlogo::{NetLogoModel, DEFAULT_CO2_VARIABLES};
use crate::domain::temperature::{
    TemperatureModel, BASE_TEMP_C, PREINDUSTRIAL_CO2_PPM, SENSITIVITY_C_PER_PPM,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub netlogo: NetLogoSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelSettings {
    #[serde(default = "default_base_temp")]
    pub base_temp_c: f64,
    #[serde(default = "default_preindustrial")]
    pub preindustrial_co2_ppm: f64,
    #[serde(default = "default_sensitivity")]
    pub sensitivity_c_per_ppm: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_temp_c: BASE_TEMP_C,
            preindustrial_co2_ppm: PREINDUSTRIAL_CO2_PPM,
            sensitivity_c_per_ppm: SENSITIVITY_C_PER_PPM,
        }
    }
}

impl ModelSettings {
    pub fn to_model(&self) -> TemperatureModel {
        TemperatureModel::new(
            self.base_temp_c,
            self.preindustrial_co2_ppm,
            self.sensitivity_c_per_ppm,
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_min_ppm")]
    pub min_ppm: f64,
    #[serde(default = "default_max_ppm")]
    pub max_ppm: f64,
    #[serde(default = "default_step_ppm")]
    pub step_ppm: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            min_ppm: DEFAULT_MIN_PPM,
            max_ppm: DEFAULT_MAX_PPM,
            step_ppm: DEFAULT_STEP_PPM,
            y_min: default_y_min(),
            y_max: default_y_max(),
            fraction_digits: default_fraction_digits(),
        }
    }
}

impl ChartSettings {
    pub fn domain(&self) -> Result<SampleDomain, ChartError> {
        SampleDomain::new(self.min_ppm, self.max_ppm, self.step_ppm)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetLogoSettings {
    #[serde(default = "default_co2_variables")]
    pub co2_variables: Vec<String>,
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

impl Default for NetLogoSettings {
    fn default() -> Self {
        Self {
            co2_variables: default_co2_variables(),
            models: default_models(),
        }
    }
}

impl NetLogoSettings {
    pub fn catalog(&self) -> Vec<NetLogoModel> {
        self.models
            .iter()
            .map(|m| NetLogoModel::new(m.name.clone(), &m.model_path, m.description.clone()))
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub name: String,
    pub model_path: String,
    #[serde(default)]
    pub description: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_temp() -> f64 {
    BASE_TEMP_C
}

fn default_preindustrial() -> f64 {
    PREINDUSTRIAL_CO2_PPM
}

fn default_sensitivity() -> f64 {
    SENSITIVITY_C_PER_PPM
}

fn default_min_ppm() -> f64 {
    DEFAULT_MIN_PPM
}

fn default_max_ppm() -> f64 {
    DEFAULT_MAX_PPM
}

fn default_step_ppm() -> f64 {
    DEFAULT_STEP_PPM
}

fn default_y_min() -> f64 {
    13.5
}

fn default_y_max() -> f64 {
    16.5
}

fn default_fraction_digits() -> usize {
    2
}

fn default_co2_variables() -> Vec<String> {
    DEFAULT_CO2_VARIABLES.iter().map(|v| v.to_string()).collect()
}

fn default_models() -> Vec<ModelConfig> {
    vec![ModelConfig {
        name: "Climate Change".to_string(),
        model_path: "assets/modelslib/Sample Models/Earth Science/Climate Change.nlogo".to_string(),
        description: "Interactive climate change model showing temperature and CO₂ relationship"
            .to_string(),
    }]
}

/// Load `config/simulator.toml` (optional) with `CLIMATE_SIM__SECTION__KEY` overrides
pub fn load_simulator_config() -> anyhow::Result<SimulatorConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/simulator").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `CLIMATE_SIM__NETLOGO__CO2_VARIABLES` takes a comma separated list
fn environment() -> config::Environment {
    config::Environment::with_prefix("CLIMATE_SIM")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("netlogo.co2_variables")
}
