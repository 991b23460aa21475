//! Protocol Module
//!
//! Defines the skkserv wire protocol for client-server communication.
//!
//! ## Protocol Format
//!
//! Text lines over TCP, one command per line. A request is a selector byte,
//! an optional argument, a single space and a line feed.
//!
//! ### Commands
//! - `0`: DISCONNECT - no reply, server closes the connection
//! - `1`: LOOKUP     - argument: dictionary key
//! - `2`: VERSION    - no argument
//! - `3`: HOST       - no argument
//! - `4`: COMPLETION - argument: key prefix
//! - `c`: CUSTOMIZE  - argument: subcommand (`reload`), never answered
//!
//! ### Replies
//! - `1/cand1/cand2/\n` when found
//! - `4key \n` when not found
//! - `text \n` for version and host

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType, CustomizeCommand, RELOAD_SUBCOMMAND};
pub use response::{Reply, Response, ResponseKind};
pub use codec::{
    encode_request, encode_response, parse_reply, read_reply, read_request, write_response,
    MAX_REQUEST_LEN,
};
