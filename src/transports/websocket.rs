//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! [`WebSocketTransport`] carries the room protocol's JSON text frames over
//! a WebSocket connection. Both `ws://` and `wss://` URLs work; TLS is
//! handled transparently via [`MaybeTlsStream`](tokio_tungstenite::MaybeTlsStream).
//!
//! Only available when the default `transport-websocket` feature is enabled.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), roshambo_client::SessionError> {
//! use roshambo_client::{Transport, WebSocketTransport};
//!
//! let mut transport = WebSocketTransport::connect("ws://localhost:8080/ws").await?;
//! transport.send(r#"{"type":"join","roomId":"room1","playerId":"p1"}"#.into()).await?;
//!
//! if let Some(Ok(msg)) = transport.recv().await {
//!     println!("received: {msg}");
//! }
//!
//! transport.close().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::error::SessionError;
use crate::transport::Transport;

/// Type alias for the underlying WebSocket stream.
pub type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// A [`Transport`] backed by a WebSocket connection.
///
/// Translates between the room protocol's text frames and WebSocket frames.
/// Binary frames, pings, and pongs are handled internally and never reach the
/// session loop.
///
/// # Cancel safety
///
/// [`recv`](Transport::recv) is cancel-safe: dropping its future before
/// completion loses no frames, so it is safe inside `tokio::select!`.
#[derive(Debug)]
pub struct WebSocketTransport {
    stream: WsStream,
    closed: bool,
}

impl WebSocketTransport {
    /// Establish a new WebSocket connection to the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the URL is invalid or the connection
    /// cannot be established. The underlying [`ErrorKind`](std::io::ErrorKind)
    /// is preserved where one exists.
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        tracing::debug!(url = %url, "connecting to room server");

        let (stream, _response) = tokio_tungstenite::connect_async(url).await.map_err(|e| {
            let kind = match &e {
                tokio_tungstenite::tungstenite::Error::Io(io) => io.kind(),
                _ => std::io::ErrorKind::Other,
            };
            SessionError::Io(std::io::Error::new(kind, e))
        })?;

        tracing::info!(url = %url, "WebSocket connection established");

        Ok(Self {
            stream,
            closed: false,
        })
    }

    /// Wrap an already-established WebSocket stream.
    ///
    /// Useful when custom TLS configuration or headers are needed that
    /// [`connect`](Self::connect) does not expose.
    pub fn from_stream(stream: WsStream) -> Self {
        Self {
            stream,
            closed: false,
        }
    }

    /// Like [`connect`](Self::connect), but failing with
    /// [`SessionError::Timeout`] if the connection is not established within
    /// the given duration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Timeout`] if the deadline elapses, or any
    /// error that [`connect`](Self::connect) may return.
    pub async fn connect_with_timeout(
        url: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, SessionError> {
        tokio::time::timeout(timeout, Self::connect(url))
            .await
            .map_err(|_| SessionError::Timeout)?
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, message: String) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::TransportClosed);
        }
        self.stream
            .send(Message::Text(message.into()))
            .await
            .map_err(|e| SessionError::TransportSend(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, SessionError>> {
        loop {
            let msg = match self.stream.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    return Some(Err(SessionError::TransportReceive(e.to_string())));
                }
                None => return None,
            };

            match msg {
                Message::Text(text) => return Some(Ok(text.to_string())),
                Message::Close(frame) => {
                    tracing::debug!(?frame, "received WebSocket close frame");
                    return None;
                }
                Message::Ping(_) => {
                    // tungstenite auto-queues the pong reply.
                    tracing::debug!("received WebSocket ping");
                }
                Message::Pong(_) => {
                    tracing::debug!("received WebSocket pong (ignored)");
                }
                Message::Binary(_) => {
                    tracing::warn!("received unexpected binary WebSocket frame, skipping");
                }
                Message::Frame(_) => {
                    // Never produced by the read half; kept for exhaustiveness.
                    tracing::debug!("received raw WebSocket frame, skipping");
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream
            .close(None)
            .await
            .map_err(|e| SessionError::TransportSend(e.to_string()))
    }
}

#[cfg(test)]
#[cfg(feature = "transport-websocket")]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn websocket_transport_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<WebSocketTransport>();
    }

    #[tokio::test]
    async fn connect_fails_with_invalid_url() {
        let result = WebSocketTransport::connect("not-a-valid-url").await;
        let err = result.unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
    }

    #[tokio::test]
    async fn connect_fails_with_unreachable_host() {
        let result = WebSocketTransport::connect("ws://127.0.0.1:1").await;
        let err = result.unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
    }

    /// Start a local WebSocket server that runs `handler` on the accepted
    /// connection and returns the address to connect to.
    async fn start_mock_server<F, Fut>(handler: F) -> String
    where
        F: FnOnce(tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>) -> Fut
            + Send
            + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            handler(ws).await;
        });

        format!("ws://{addr}")
    }

    #[tokio::test]
    async fn recv_receives_text_frames_in_order() {
        let url = start_mock_server(|mut ws| async move {
            ws.send(Message::Text(r#"{"type":"ready"}"#.into()))
                .await
                .unwrap();
            ws.send(Message::Text(r#"{"type":"error","message":"x"}"#.into()))
                .await
                .unwrap();
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();

        let msg1 = transport.recv().await.unwrap().unwrap();
        assert_eq!(msg1, r#"{"type":"ready"}"#);

        let msg2 = transport.recv().await.unwrap().unwrap();
        assert_eq!(msg2, r#"{"type":"error","message":"x"}"#);
    }

    #[tokio::test]
    async fn recv_returns_none_on_close_frame() {
        let url = start_mock_server(|mut ws| async move {
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        assert!(transport.recv().await.is_none());
    }

    #[tokio::test]
    async fn recv_skips_binary_frames() {
        let url = start_mock_server(|mut ws| async move {
            ws.send(Message::Binary(vec![0xDE, 0xAD].into()))
                .await
                .unwrap();
            ws.send(Message::Text("after_binary".into())).await.unwrap();
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        let msg = transport.recv().await.unwrap().unwrap();
        assert_eq!(msg, "after_binary");
    }

    #[tokio::test]
    async fn send_after_close_returns_transport_closed() {
        let url = start_mock_server(|mut ws| async move {
            while let Some(Ok(_)) = ws.next().await {}
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        transport.close().await.unwrap();

        let err = transport.send("oops".to_string()).await.unwrap_err();
        assert!(matches!(err, SessionError::TransportClosed));
    }

    #[tokio::test]
    async fn double_close_is_idempotent() {
        let url =
            start_mock_server(|mut ws| async move { while let Some(Ok(_)) = ws.next().await {} })
                .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        transport.close().await.unwrap();
        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn connect_with_timeout_times_out() {
        // Non-routable address guarantees the deadline elapses.
        let result = WebSocketTransport::connect_with_timeout(
            "ws://192.0.2.1:1",
            std::time::Duration::from_millis(50),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, SessionError::Timeout));
    }

    #[tokio::test]
    async fn send_round_trip() {
        let url = start_mock_server(|mut ws| async move {
            if let Some(Ok(Message::Text(text))) = ws.next().await {
                ws.send(Message::Text(text)).await.unwrap();
            }
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        transport.send("echo_me".to_string()).await.unwrap();

        let msg = transport.recv().await.unwrap().unwrap();
        assert_eq!(msg, "echo_me");
    }

    #[tokio::test]
    async fn from_stream_constructor_works() {
        let url = start_mock_server(|mut ws| async move {
            ws.send(Message::Text("from_stream_msg".into()))
                .await
                .unwrap();
            ws.close(None).await.unwrap();
        })
        .await;

        let (ws_stream, _) = tokio_tungstenite::connect_async(&url).await.unwrap();
        let mut transport = WebSocketTransport::from_stream(ws_stream);

        let msg = transport.recv().await.unwrap().unwrap();
        assert_eq!(msg, "from_stream_msg");
    }
}
