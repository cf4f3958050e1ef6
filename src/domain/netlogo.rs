// NetLogo bridge domain model - command strings for an embedded third-party model
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NETLOGO_WEB_LAUNCH: &str = "https://www.netlogoweb.org/launch#";
pub const NETLOGO_WEB_ROOT: &str = "https://www.netlogoweb.org/";
pub const UPDATE_DISPLAY: &str = "update-display";
pub const MESSAGE_TYPE_COMMAND: &str = "netlogo-command";

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load NetLogo model. Please check the model URL or try a different model.";

/// Variable names third-party climate models commonly use for the CO₂ level
pub const DEFAULT_CO2_VARIABLES: [&str; 5] = [
    "co2-level",
    "co2",
    "carbon-dioxide",
    "greenhouse-gas",
    "pollution",
];

#[derive(Debug, Error, PartialEq)]
pub enum BridgeError {
    #[error("unknown model control '{0}'")]
    UnknownAction(String),
    #[error("the model frame has not reported itself loaded")]
    FrameNotLoaded,
    #[error("Please upload a valid .nlogo file")]
    InvalidModelFile,
    #[error(
        "Custom model upload requires NetLogo Web hosting. Please use the default models or host your model on NetLogo Web."
    )]
    HostingRequired,
}

/// Message posted into the model frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub command: String,
    pub issued_at: DateTime<Utc>,
}

impl CommandEnvelope {
    pub fn new(command: String) -> Self {
        Self {
            kind: MESSAGE_TYPE_COMMAND,
            command,
            issued_at: Utc::now(),
        }
    }
}

/// Commands pushing a CO₂ level into the model: one `set` per candidate
/// variable name, then a display refresh. Models silently reject the names
/// they do not define.
pub fn co2_commands<S: AsRef<str>>(co2_ppm: f64, candidates: &[S]) -> Vec<String> {
    candidates
        .iter()
        .map(|name| format!("set {} {}", name.as_ref(), co2_ppm))
        .chain(std::iter::once(UPDATE_DISPLAY.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Play,
    Pause,
    Reset,
    Setup,
}

impl ControlAction {
    pub fn commands(&self) -> &'static [&'static str] {
        match self {
            ControlAction::Play => &["go"],
            ControlAction::Pause => &["stop"],
            ControlAction::Reset => &["reset-ticks", "setup"],
            ControlAction::Setup => &["setup"],
        }
    }

    /// Whether the model is running once the action has been sent
    pub fn leaves_running(&self) -> bool {
        matches!(self, ControlAction::Play)
    }
}

impl FromStr for ControlAction {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(ControlAction::Play),
            "pause" => Ok(ControlAction::Pause),
            "reset" => Ok(ControlAction::Reset),
            "setup" => Ok(ControlAction::Setup),
            other => Err(BridgeError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlAction::Play => "play",
            ControlAction::Pause => "pause",
            ControlAction::Reset => "reset",
            ControlAction::Setup => "setup",
        };
        f.write_str(name)
    }
}

/// Load state of the embedded frame as reported by the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FrameStatus {
    Loading,
    Loaded,
    Failed(String),
}

impl FrameStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FrameStatus::Loaded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetLogoModel {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl NetLogoModel {
    pub fn new(name: String, model_path: &str, description: String) -> Self {
        Self {
            name,
            url: launch_url(model_path),
            description,
        }
    }
}

/// NetLogo Web launch URL for a model hosted under the NetLogo Web asset tree,
/// e.g. "assets/modelslib/Sample Models/Earth Science/Climate Change.nlogo"
pub fn launch_url(model_path: &str) -> String {
    let encoded: Vec<String> = model_path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}{}{}", NETLOGO_WEB_LAUNCH, NETLOGO_WEB_ROOT, encoded.join("/"))
}

/// Custom models cannot be hosted from here; only the file type is checked
/// so the user gets the more specific message first.
pub fn check_upload(file_name: &str) -> Result<(), BridgeError> {
    if !file_name.ends_with(".nlogo") {
        return Err(BridgeError::InvalidModelFile);
    }
    Err(BridgeError::HostingRequired)
}
