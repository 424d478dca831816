//! WebSocket Slider Channel
//!
//! Live updates for the dashboard page: each connection is one session,
//! each slider move is one `set_range` message answered by one
//! `chart_update`.

pub mod handler;
pub mod messages;

pub use handler::websocket_handler;
pub use messages::{ChartPayload, ClientMessage, ServerMessage};
