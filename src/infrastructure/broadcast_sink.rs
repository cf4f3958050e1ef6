// Broadcast sink - fans frame commands out to every subscribed frame host
use crate::application::command_sink::CommandSink;
use crate::domain::netlogo::CommandEnvelope;
use async_trait::async_trait;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<CommandEnvelope>,
}

impl BroadcastSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CommandEnvelope> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandSink for BroadcastSink {
    async fn deliver(&self, envelope: CommandEnvelope) -> anyhow::Result<()> {
        let receivers = self
            .tx
            .send(envelope)
            .map_err(|_| anyhow::anyhow!("no frame host subscribed"))?;
        tracing::debug!("Delivered NetLogo command to {} subscriber(s)", receivers);
        Ok(())
    }
}
