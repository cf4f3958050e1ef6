// Application layer - Use cases over the domain models
pub mod command_sink;
pub mod netlogo_session;
pub mod simulation_service;
