//! WebSocket Live Feed
//!
//! Pushes the full measurement history to connected viewers on every
//! successful ingest.
//!
//! ## Architecture
//!
//! - **BroadcastHub**: Owns the set of subscriber channels and fans
//!   snapshots out to all of them
//! - **Handler**: Handles the WebSocket upgrade and session lifecycle
//! - **Messages**: The `{ "result": ... }` feed message format
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8080/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   const history = JSON.parse(msg.result); // [[time, x, y, z], ...] newest first
//! };
//! ```
//!
//! A viewer that connects between writes receives nothing until the next
//! measurement arrives; there is no catch-up push on connect.

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{BroadcastHub, HubConfig, HubError, SubscriberId};
pub use messages::{FeedMessage, SessionReject};
