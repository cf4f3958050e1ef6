// NetLogo session - Live CO₂ level and frame state driving the bridge
use crate::application::command_sink::CommandSink;
use crate::domain::netlogo::{
    check_upload, co2_commands, BridgeError, CommandEnvelope, ControlAction, FrameStatus,
    NetLogoModel, LOAD_FAILED_MESSAGE,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Level the simulator opens at (approximate 2024 concentration)
pub const INITIAL_CO2_PPM: f64 = 420.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub co2_ppm: f64,
    pub model_url: String,
    pub frame: FrameStatus,
    pub running: bool,
}

#[derive(Clone)]
pub struct NetLogoSession {
    sink: Arc<dyn CommandSink>,
    co2_variables: Vec<String>,
    catalog: Vec<NetLogoModel>,
    state: Arc<RwLock<SessionSnapshot>>,
}

impl NetLogoSession {
    pub fn new(
        sink: Arc<dyn CommandSink>,
        co2_variables: Vec<String>,
        catalog: Vec<NetLogoModel>,
    ) -> Self {
        let model_url = catalog.first().map(|m| m.url.clone()).unwrap_or_default();
        let state = SessionSnapshot {
            co2_ppm: INITIAL_CO2_PPM,
            model_url,
            frame: FrameStatus::Loading,
            running: false,
        };
        Self {
            sink,
            co2_variables,
            catalog,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn catalog(&self) -> &[NetLogoModel] {
        &self.catalog
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    /// Record a new live CO₂ level. Pushes it into the model only when the
    /// level actually changed and the frame is loaded. Returns the number of
    /// commands emitted.
    pub async fn set_co2(&self, co2_ppm: f64) -> usize {
        let mut state = self.state.write().await;
        if state.co2_ppm == co2_ppm {
            return 0;
        }
        state.co2_ppm = co2_ppm;
        tracing::info!("CO₂ level set to {} ppm", co2_ppm);

        if !state.frame.is_loaded() {
            return 0;
        }
        drop(state);

        self.dispatch(co2_commands(co2_ppm, &self.co2_variables)).await
    }

    /// Switch to another model; the new frame has to report in again
    pub async fn select_model(&self, model_url: String) -> SessionSnapshot {
        let mut state = self.state.write().await;
        tracing::info!("Selected NetLogo model {}", model_url);
        state.model_url = model_url;
        state.frame = FrameStatus::Loading;
        state.running = false;
        state.clone()
    }

    /// The frame finished loading: push the current level straight away
    pub async fn frame_loaded(&self) -> usize {
        let mut state = self.state.write().await;
        state.frame = FrameStatus::Loaded;
        tracing::info!("NetLogo frame loaded: {}", state.model_url);
        let commands = co2_commands(state.co2_ppm, &self.co2_variables);
        drop(state);

        self.dispatch(commands).await
    }

    /// Terminal until a model is selected again
    pub async fn frame_failed(&self, reason: Option<String>) -> SessionSnapshot {
        let mut state = self.state.write().await;
        tracing::warn!(
            "NetLogo frame failed to load {}: {}",
            state.model_url,
            reason.as_deref().unwrap_or("no reason given")
        );
        state.frame = FrameStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
        state.running = false;
        state.clone()
    }

    pub async fn control(&self, action: ControlAction) -> Result<SessionSnapshot, BridgeError> {
        let mut state = self.state.write().await;
        if !state.frame.is_loaded() {
            return Err(BridgeError::FrameNotLoaded);
        }
        tracing::info!("NetLogo control: {}", action);

        state.running = action.leaves_running();
        let snapshot = state.clone();
        drop(state);

        let commands = action.commands().iter().map(|c| c.to_string()).collect();
        self.dispatch(commands).await;
        Ok(snapshot)
    }

    pub fn check_upload(&self, file_name: &str) -> Result<(), BridgeError> {
        check_upload(file_name)
    }

    // Fire and forget; undelivered commands are only logged. Runs without
    // the state lock so a slow sink never stalls snapshots.
    async fn dispatch(&self, commands: Vec<String>) -> usize {
        let count = commands.len();
        for command in commands {
            if let Err(e) = self.sink.deliver(CommandEnvelope::new(command.clone())).await {
                tracing::debug!("Dropped NetLogo command '{}': {}", command, e);
            }
        }
        count
    }
}
