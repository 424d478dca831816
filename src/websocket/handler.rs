//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection. Messages are processed one at a time, so a session never
//! recomputes two slider changes concurrently.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::ops::ControlFlow;
use std::sync::Arc;

use super::messages::{ChartPayload, ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::DashboardSession;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = uuid::Uuid::new_v4().to_string();
    let (mut sender, mut receiver) = socket.split();

    let (mut session, greeting) = open_session(&state, &connection_id).await;
    if send(&mut sender, &greeting).await.is_err() {
        tracing::debug!(connection_id = %connection_id, "Failed to send greeting");
        return;
    }

    tracing::info!(connection_id = %connection_id, "Dashboard session opened");

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
        };

        let reply = match handle_ws_message(&state, &mut session, message).await {
            ControlFlow::Continue(Some(reply)) => reply,
            ControlFlow::Continue(None) => continue,
            ControlFlow::Break(()) => break,
        };

        if send(&mut sender, &reply).await.is_err() {
            tracing::debug!(
                connection_id = %connection_id,
                "WebSocket send failed, closing connection"
            );
            break;
        }
    }

    tracing::info!(connection_id = %connection_id, "Dashboard session closed");
}

/// Fetch the dataset and build the initial full-range session
async fn open_session(state: &AppState, connection_id: &str) -> (DashboardSession, ServerMessage) {
    match state.source.fetch().await {
        Ok(dataset) => {
            let session = DashboardSession::new(dataset.bounds());
            let view = session.view(&dataset);
            let greeting = ServerMessage::Ready {
                connection_id: connection_id.to_string(),
                bounds: view.bounds,
                line: ChartPayload::from(&view.line),
                scatter: ChartPayload::from(&view.scatter),
            };
            (session, greeting)
        }
        Err(e) => {
            tracing::error!(connection_id = %connection_id, error = %e, "Dataset fetch failed");
            (DashboardSession::new(None), ServerMessage::error(e.to_string()))
        }
    }
}

async fn send(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).map_err(axum::Error::new)?;
    sender.send(Message::Text(text)).await
}

/// Handle a received WebSocket frame
///
/// Breaks when the connection should be closed.
async fn handle_ws_message(
    state: &AppState,
    session: &mut DashboardSession,
    message: Message,
) -> ControlFlow<(), Option<ServerMessage>> {
    match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => {
                ControlFlow::Continue(Some(handle_client_message(state, session, client_msg).await))
            }
            Err(e) => {
                tracing::debug!(error = %e, text = %text, "Invalid client message");
                // Keep the connection open
                ControlFlow::Continue(Some(ServerMessage::error(format!(
                    "Invalid message format: {}",
                    e
                ))))
            }
        },
        Message::Binary(_) => ControlFlow::Continue(Some(ServerMessage::error(
            "Binary messages not supported",
        ))),
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => ControlFlow::Continue(None),
        Message::Close(_) => ControlFlow::Break(()),
    }
}

/// Handle a parsed client message
///
/// A slider change re-fetches the dataset, then rebuilds only that chart.
pub async fn handle_client_message(
    state: &AppState,
    session: &mut DashboardSession,
    message: ClientMessage,
) -> ServerMessage {
    match message {
        ClientMessage::SetRange { chart, from, to } => match state.source.fetch().await {
            Ok(dataset) => {
                let panel = session.set_range(chart, from, to, &dataset);
                ServerMessage::chart_update(&panel)
            }
            Err(e) => {
                tracing::error!(chart = %chart, error = %e, "Dataset fetch failed");
                ServerMessage::error(e.to_string())
            }
        },
        ClientMessage::Ping => ServerMessage::Pong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::chart::ChartKind;
    use crate::dataset::{Dataset, RangeSelection, Record};
    use crate::source::{DataSource, SourceError, SourceResult, StaticSource};
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn location(&self) -> &str {
            "nowhere"
        }

        async fn fetch(&self) -> SourceResult<Arc<Dataset>> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }
    }

    fn state() -> AppState {
        let dataset = Dataset::new((1960..=2022).map(|y| Record::new(y, 1.0)).collect());
        AppState::new(Arc::new(StaticSource::new(dataset)), ApiConfig::default())
    }

    fn failing_state() -> AppState {
        AppState::new(Arc::new(FailingSource), ApiConfig::default())
    }

    #[tokio::test]
    async fn test_set_range_updates_only_that_chart() {
        let state = state();
        let (mut session, greeting) = open_session(&state, "test").await;
        assert!(matches!(greeting, ServerMessage::Ready { .. }));

        let reply = handle_client_message(
            &state,
            &mut session,
            ClientMessage::SetRange {
                chart: ChartKind::Scatter,
                from: 2008,
                to: 2010,
            },
        )
        .await;

        match reply {
            ServerMessage::ChartUpdate { chart, payload } => {
                assert_eq!(chart, ChartKind::Scatter);
                assert_eq!(payload.points, 3);
            }
            other => panic!("Expected ChartUpdate, got {:?}", other),
        }
        assert_eq!(session.selection(ChartKind::Line), RangeSelection::new(1960, 2022));
    }

    #[tokio::test]
    async fn test_ping() {
        let state = state();
        let mut session = DashboardSession::new(None);
        let reply = handle_client_message(&state, &mut session, ClientMessage::Ping).await;
        assert!(matches!(reply, ServerMessage::Pong));
    }

    #[tokio::test]
    async fn test_invalid_text_keeps_connection_open() {
        let state = state();
        let mut session = DashboardSession::new(None);
        let flow = handle_ws_message(&state, &mut session, Message::Text("nope".to_string())).await;
        assert!(matches!(flow, ControlFlow::Continue(Some(ServerMessage::Error { .. }))));

        let flow = handle_ws_message(&state, &mut session, Message::Close(None)).await;
        assert!(matches!(flow, ControlFlow::Break(())));
    }

    #[tokio::test]
    async fn test_open_session_reports_fetch_failure() {
        let (session, greeting) = open_session(&failing_state(), "test").await;
        match greeting {
            ServerMessage::Error { message } => assert!(message.contains("connection refused")),
            other => panic!("Expected Error, got {:?}", other),
        }
        assert_eq!(session.selection(ChartKind::Line), RangeSelection::new(0, 0));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_session_open() {
        let state = failing_state();
        let mut session = DashboardSession::new(None);

        let reply = handle_client_message(
            &state,
            &mut session,
            ClientMessage::SetRange {
                chart: ChartKind::Line,
                from: 2008,
                to: 2010,
            },
        )
        .await;
        assert!(matches!(reply, ServerMessage::Error { .. }));

        let text = r#"{"type":"set_range","chart":"scatter","from":2000,"to":2013}"#;
        let flow = handle_ws_message(&state, &mut session, Message::Text(text.to_string())).await;
        assert!(matches!(flow, ControlFlow::Continue(Some(ServerMessage::Error { .. }))));

        let flow = handle_ws_message(&state, &mut session, Message::Ping(Vec::new())).await;
        assert!(matches!(flow, ControlFlow::Continue(None)));
    }
}
