// Application state for HTTP handlers
use crate::application::netlogo_session::NetLogoSession;
use crate::application::simulation_service::SimulationService;
use crate::infrastructure::broadcast_sink::BroadcastSink;

#[derive(Clone)]
pub struct AppState {
    pub simulation_service: SimulationService,
    pub netlogo_session: NetLogoSession,
    pub command_sink: BroadcastSink,
}
