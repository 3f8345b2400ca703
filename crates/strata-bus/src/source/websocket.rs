//! Live WebSocket feed.
//!
//! Text frames are forwarded untouched as [`Inbound::Frame`] and binary frames
//! as [`Inbound::Bytes`]; parsing and validation belong to the pipeline. There
//! is no reconnection: once the connection fails or closes, the source ends.

use super::{SourceEnd, SourceStats};
use crate::channel::{FeedSender, Inbound};
use crate::error::{BusError, Result};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

pub struct WebSocketSource {
    url: Url,
}

impl WebSocketSource {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| BusError::InvalidConfig(format!("invalid feed url {:?}: {}", url, e)))?;
        match url.scheme() {
            "ws" | "wss" => Ok(Self { url }),
            other => Err(BusError::InvalidConfig(format!(
                "feed url must use ws or wss, got {}",
                other
            ))),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Connect and forward frames until the connection ends.
    pub async fn run(self, sender: FeedSender) -> SourceStats {
        let mut stream = match connect_async(self.url.as_str()).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::error!(url = %self.url, "WebSocket connect failed: {}", e);
                return transport_failed(&sender, 0, format!("connect {}: {}", self.url, e)).await;
            }
        };
        tracing::info!(url = %self.url, "WebSocket feed connected");

        let mut forwarded = 0u64;
        while let Some(message) = stream.next().await {
            let inbound = match message {
                Ok(Message::Text(text)) => Inbound::Frame(text),
                Ok(Message::Binary(bytes)) => Inbound::Bytes(bytes),
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!(url = %self.url, "WebSocket read failed: {}", e);
                    return transport_failed(&sender, forwarded, e.to_string()).await;
                }
            };

            if sender.send(inbound).await.is_err() {
                return SourceStats {
                    forwarded,
                    ended: SourceEnd::ReceiverClosed,
                };
            }
            forwarded += 1;
        }

        tracing::info!(url = %self.url, forwarded, "WebSocket feed closed by remote");
        SourceStats {
            forwarded,
            ended: SourceEnd::RemoteClosed,
        }
    }

    pub fn spawn(self, sender: FeedSender) -> JoinHandle<SourceStats> {
        tokio::spawn(self.run(sender))
    }
}

async fn transport_failed(sender: &FeedSender, forwarded: u64, reason: String) -> SourceStats {
    let ended = match sender.send(Inbound::TransportError(reason)).await {
        Ok(()) => SourceEnd::TransportFailed,
        Err(_) => SourceEnd::ReceiverClosed,
    };
    SourceStats { forwarded, ended }
}
