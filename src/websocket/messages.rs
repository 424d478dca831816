//! WebSocket Message Types
//!
//! Defines all message types exchanged between the dashboard page and the
//! server over `/ws`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::ChartKind;
use crate::dashboard::ChartPanel;
use crate::dataset::{RangeSelection, YearBounds};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A slider moved
    SetRange {
        /// Which chart's slider
        chart: ChartKind,
        /// Lower year
        from: i32,
        /// Upper year
        to: i32,
    },
    /// Ping for keepalive
    Ping,
}

/// Chart state carried in server messages
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub selection: RangeSelection,
    pub points: usize,
    pub figure: Value,
}

impl From<&ChartPanel> for ChartPayload {
    fn from(panel: &ChartPanel) -> Self {
        Self {
            selection: panel.selection,
            points: panel.spec.points.len(),
            figure: panel.figure(),
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session started; both charts at their default range
    Ready {
        /// Unique connection identifier
        connection_id: String,
        /// Observed year bounds, absent for an empty dataset
        bounds: Option<YearBounds>,
        line: ChartPayload,
        scatter: ChartPayload,
    },
    /// One chart was recomputed after a slider change
    ChartUpdate {
        chart: ChartKind,
        #[serde(flatten)]
        payload: ChartPayload,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    pub fn chart_update(panel: &ChartPanel) -> Self {
        ServerMessage::ChartUpdate {
            chart: panel.kind,
            payload: ChartPayload::from(panel),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::bind_scatter_chart;
    use crate::dataset::{filter, Record};

    #[test]
    fn test_client_message_deserialize_set_range() {
        let json = r#"{"type": "set_range", "chart": "scatter", "from": 2000, "to": 2013}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SetRange { chart, from, to } => {
                assert_eq!(chart, ChartKind::Scatter);
                assert_eq!(from, 2000);
                assert_eq!(to, 2013);
            }
            _ => panic!("Expected SetRange"),
        }
    }

    #[test]
    fn test_client_message_rejects_unknown_chart() {
        let json = r#"{"type": "set_range", "chart": "bar", "from": 2000, "to": 2013}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_serialize_chart_update() {
        let records = vec![Record::new(2008, 44.0), Record::new(2009, 60.0)];
        let panel = ChartPanel {
            kind: ChartKind::Scatter,
            selection: RangeSelection::new(2008, 2009),
            spec: bind_scatter_chart(&filter(&records, 2008, 2009)),
        };

        let json = serde_json::to_value(ServerMessage::chart_update(&panel)).unwrap();
        assert_eq!(json["type"], "chart_update");
        assert_eq!(json["chart"], "scatter");
        assert_eq!(json["points"], 2);
        assert_eq!(json["selection"]["lower"], 2008);
        assert_eq!(json["figure"]["data"][0]["mode"], "markers");
    }

    #[test]
    fn test_server_message_serialize_error() {
        let json = serde_json::to_string(&ServerMessage::error("boom")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"boom"}"#);
    }
}
