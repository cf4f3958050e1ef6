// Infrastructure layer - External dependencies and adapters
pub mod broadcast_sink;
pub mod command_stream;
pub mod config;
pub mod http_response;
