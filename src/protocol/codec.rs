//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────────┬──────────────────────┬───────┬──────┐
//! │ Selector (1) │ Argument (variable)  │ ' '   │ '\n' │
//! └──────────────┴──────────────────────┴───────┴──────┘
//! ```
//!
//! ### Response Format
//! ```text
//! found:       '1' ( '/' candidate )* '/' '\n'
//! not found:   '4' key ' ' '\n'
//! info:        text ' ' '\n'
//! empty:       (nothing)
//! ```

use std::io::{BufRead, ErrorKind, Read, Write};

use crate::error::{Result, SkkError};
use super::{Command, CommandType, Response, ResponseKind};

/// Longest request line accepted, including the line feed (64 KiB)
pub const MAX_REQUEST_LEN: usize = 64 * 1024;

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to its exact wire bytes
pub fn encode_response(response: &Response) -> Vec<u8> {
    match response {
        Response::Empty => Vec::new(),
        Response::Found(candidates) => {
            let mut out = String::new();
            out.push(ResponseKind::Found.marker());
            out.push('/');
            for candidate in candidates {
                out.push_str(candidate);
                out.push('/');
            }
            out.push('\n');
            out.into_bytes()
        }
        Response::NotFound(key) => {
            format!("{}{} \n", ResponseKind::NotFound.marker(), key).into_bytes()
        }
        Response::Info(text) => format!("{} \n", text).into_bytes(),
    }
}

/// Decode a reply line, knowing which command it answers
pub fn parse_reply(line: &str, answered: CommandType) -> Result<Response> {
    let line = line.strip_suffix('\n').unwrap_or(line);

    match answered {
        CommandType::Lookup | CommandType::Completion => {
            if let Some(body) = line.strip_prefix(ResponseKind::Found.marker()) {
                let candidates = body
                    .strip_prefix('/')
                    .and_then(|b| b.strip_suffix('/'))
                    .ok_or_else(|| SkkError::Protocol(format!("malformed candidate list: {:?}", line)))?;
                let candidates = candidates.split('/').map(str::to_string).collect();
                Ok(Response::Found(candidates))
            } else if let Some(key) = line.strip_prefix(ResponseKind::NotFound.marker()) {
                Ok(Response::NotFound(key.strip_suffix(' ').unwrap_or(key).to_string()))
            } else {
                Err(SkkError::Protocol(format!("unexpected reply: {:?}", line)))
            }
        }
        CommandType::Version | CommandType::Host => {
            Ok(Response::Info(line.strip_suffix(' ').unwrap_or(line).to_string()))
        }
        CommandType::Disconnect | CommandType::Customize => Ok(Response::Empty),
    }
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command as request text (before byte encoding)
pub fn encode_request(command: &Command) -> String {
    let selector = command.command_type().selector();
    match command {
        Command::Lookup { key } => format!("{}{} \n", selector, key),
        Command::Completion { prefix } => format!("{}{} \n", selector, prefix),
        Command::Customize(sub) => format!("{}{} \n", selector, sub.name()),
        Command::Disconnect | Command::Version | Command::Host => format!("{} \n", selector),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one raw request line, including its line feed
///
/// Blocks until a full line arrives. A stream that ends before the line
/// feed (including a clean close with nothing buffered) and a line longer
/// than [`MAX_REQUEST_LEN`] are both transport errors; a trailing partial
/// line is discarded.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_REQUEST_LEN as u64)
        .read_until(b'\n', &mut line)?;

    if read == 0 {
        return Err(std::io::Error::from(ErrorKind::UnexpectedEof).into());
    }

    if line.last() != Some(&b'\n') {
        if read >= MAX_REQUEST_LEN {
            return Err(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("request line exceeds {} bytes", MAX_REQUEST_LEN),
            )
            .into());
        }
        return Err(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("stream closed inside a request line ({} bytes dropped)", read),
        )
        .into());
    }

    Ok(line)
}

/// Write a response to a stream
///
/// Empty responses write nothing but still flush.
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    if !response.is_empty() {
        writer.write_all(&encode_response(response))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one reply line as text (client side)
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = Vec::new();
    let read = reader.read_until(b'\n', &mut line)?;
    if read == 0 {
        return Err(std::io::Error::from(ErrorKind::UnexpectedEof).into());
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}
