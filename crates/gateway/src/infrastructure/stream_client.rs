use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Error, Debug)]
pub enum WsError {
    #[error("connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("channel closed")]
    ChannelClosed,
}

/// Events surfaced from the streaming connection
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A non-empty binary frame, opaque to this layer
    Frame(Vec<u8>),
    /// Zero-length frame or protocol-level ping/pong
    Heartbeat,
    /// The peer closed the connection
    Disconnected,
    /// Transport-level failure, session is dead
    TransportError(String),
}

/// WebSocket client for the venue's streaming endpoint
/// Infrastructure component - handles frame transport only
pub struct StreamClient {
    url: String,
}

impl StreamClient {
    pub fn new(url: impl Into<String>) -> Self {
        StreamClient { url: url.into() }
    }

    /// Connect and return a frame sink plus the inbound event stream.
    ///
    /// Dropping both handles tears the session down; reconnect by calling
    /// `connect` again.
    pub async fn connect(&self) -> Result<(FrameSink, mpsc::Receiver<StreamEvent>), WsError> {
        let (ws_stream, _) = connect_async(&self.url).await?;
        let (mut write, mut read) = ws_stream.split();

        // Channel for sending frames to the WebSocket
        let (frame_tx, mut frame_rx) = mpsc::channel::<Vec<u8>>(32);

        // Channel for receiving events from the WebSocket
        let (event_tx, event_rx) = mpsc::channel::<StreamEvent>(1024);

        // Spawn task to handle outgoing frames
        let event_tx_write = event_tx.clone();
        tokio::spawn(async move {
            while let Some(frame) = frame_rx.recv().await {
                if let Err(e) = write.send(Message::Binary(frame.into())).await {
                    let _ = event_tx_write
                        .send(StreamEvent::TransportError(e.to_string()))
                        .await;
                    break;
                }
            }
        });

        // Spawn task to handle incoming frames
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let event = match message {
                    Ok(Message::Binary(data)) => {
                        if data.is_empty() {
                            StreamEvent::Heartbeat
                        } else {
                            StreamEvent::Frame(data.to_vec())
                        }
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => StreamEvent::Heartbeat,
                    Ok(Message::Close(_)) => {
                        let _ = event_tx.send(StreamEvent::Disconnected).await;
                        break;
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        let _ = event_tx
                            .send(StreamEvent::TransportError(e.to_string()))
                            .await;
                        break;
                    }
                };

                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok((FrameSink { tx: frame_tx }, event_rx))
    }
}

/// Handle for sending binary frames on an open session
#[derive(Clone)]
pub struct FrameSink {
    tx: mpsc::Sender<Vec<u8>>,
}

impl FrameSink {
    pub async fn send(&self, frame: Vec<u8>) -> Result<(), WsError> {
        self.tx.send(frame).await.map_err(|_| WsError::ChannelClosed)
    }
}
