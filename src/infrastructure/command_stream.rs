// Chunked NDJSON streaming of frame commands
use crate::domain::netlogo::CommandEnvelope;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;

/// Create a chunked response with one JSON envelope per line
pub fn ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = CommandEnvelope> + Send + 'static,
{
    let byte_stream = stream.map(|envelope| serialize_line(&envelope));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single envelope followed by a newline
fn serialize_line(envelope: &CommandEnvelope) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(envelope)?;
    let mut line = BytesMut::with_capacity(json.len() + 1);
    line.put_slice(&json);
    line.put_u8(b'\n');
    Ok(line.freeze())
}

/// Stream everything broadcast to the receiver until the sender goes away.
/// A subscriber that falls behind skips the missed commands.
pub fn stream_from_receiver(
    mut rx: broadcast::Receiver<CommandEnvelope>,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(envelope) => yield envelope,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Frame host lagged, skipped {} command(s)", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    match ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_line() {
        let line = serialize_line(&CommandEnvelope::new("go".to_string())).unwrap();
        assert_eq!(line.last(), Some(&b'\n'));

        let value: serde_json::Value = serde_json::from_slice(&line[..line.len() - 1]).unwrap();
        assert_eq!(value["command"], "go");
        assert_eq!(value["type"], "netlogo-command");
    }

    #[tokio::test]
    async fn test_stream_ends_when_sender_dropped() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(CommandEnvelope::new("set co2 300".to_string())).unwrap();
        tx.send(CommandEnvelope::new("update-display".to_string())).unwrap();
        drop(tx);

        let response = stream_from_receiver(rx).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let lines: Vec<serde_json::Value> = body
            .split(|b| *b == b'\n')
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_slice(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["command"], "set co2 300");
        assert_eq!(lines[1]["command"], "update-display");
    }

    #[tokio::test]
    async fn test_lagging_subscriber_resumes_with_newest_commands() {
        let (tx, rx) = broadcast::channel(2);
        for command in ["set co2 300", "set co2 310", "set co2 320", "update-display"] {
            tx.send(CommandEnvelope::new(command.to_string())).unwrap();
        }
        drop(tx);

        let response = stream_from_receiver(rx).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let commands: Vec<String> = body
            .split(|b| *b == b'\n')
            .filter(|l| !l.is_empty())
            .map(|l| {
                let value: serde_json::Value = serde_json::from_slice(l).unwrap();
                value["command"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(commands, vec!["set co2 320", "update-display"]);
    }
}
