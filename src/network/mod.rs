//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread that only accepts and spawns
//! - One handler thread per connection, optionally capped
//! - Requests routed through the Dispatcher

mod server;
mod connection;
mod limiter;

pub use server::Server;
pub use connection::Connection;
pub use limiter::{ConnectionLimiter, Permit};
