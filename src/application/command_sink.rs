// Delivery port for commands bound for the embedded model frame
use crate::domain::netlogo::CommandEnvelope;
use async_trait::async_trait;

#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Hand one command to whatever relays it into the frame.
    /// Best effort: an error means the command was dropped.
    /// Called outside the session lock, but callers still await each
    /// delivery in turn, so implementations should hand off and return.
    async fn deliver(&self, envelope: CommandEnvelope) -> anyhow::Result<()>;
}
