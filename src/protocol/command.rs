//! Command definitions
//!
//! Parses decoded request lines into commands.

use crate::error::{Result, SkkError};

/// Command selector bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Disconnect = b'0',
    Lookup = b'1',
    Version = b'2',
    Host = b'3',
    Completion = b'4',
    Customize = b'c',
}

impl CommandType {
    /// Map a selector character to its command type
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector {
            '0' => Some(CommandType::Disconnect),
            '1' => Some(CommandType::Lookup),
            '2' => Some(CommandType::Version),
            '3' => Some(CommandType::Host),
            '4' => Some(CommandType::Completion),
            'c' => Some(CommandType::Customize),
            _ => None,
        }
    }

    pub fn selector(self) -> char {
        self as u8 as char
    }
}

/// Subcommand name that triggers a dictionary reload
pub const RELOAD_SUBCOMMAND: &str = "reload";

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Close the connection
    Disconnect,

    /// Exact dictionary lookup
    Lookup { key: String },

    /// Server version
    Version,

    /// Server listen address
    Host,

    /// Prefix completion
    Completion { prefix: String },

    /// Non-standard control command
    Customize(CustomizeCommand),
}

/// Subcommands of the `c` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizeCommand {
    /// Rebuild the dictionary from the configured sources
    Reload,

    /// Accepted and ignored
    Unknown(String),
}

impl CustomizeCommand {
    pub fn parse(name: &str) -> Self {
        match name {
            RELOAD_SUBCOMMAND => CustomizeCommand::Reload,
            other => CustomizeCommand::Unknown(other.to_string()),
        }
    }

    /// Wire name of the subcommand
    pub fn name(&self) -> &str {
        match self {
            CustomizeCommand::Reload => RELOAD_SUBCOMMAND,
            CustomizeCommand::Unknown(name) => name,
        }
    }
}

impl Command {
    /// Parse one decoded request line
    ///
    /// A single trailing line feed is stripped first. The argument of a
    /// command is everything after the selector with a single trailing
    /// space removed.
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.strip_suffix('\n').unwrap_or(line);

        let mut chars = line.chars();
        let selector = chars
            .next()
            .ok_or_else(|| SkkError::Protocol("empty request".to_string()))?;
        let argument = chars.as_str();
        let argument = argument.strip_suffix(' ').unwrap_or(argument);

        let command_type = CommandType::from_selector(selector)
            .ok_or_else(|| SkkError::Protocol(format!("unknown command selector {:?}", selector)))?;

        Ok(match command_type {
            CommandType::Disconnect => Command::Disconnect,
            CommandType::Lookup => Command::Lookup {
                key: argument.to_string(),
            },
            CommandType::Version => Command::Version,
            CommandType::Host => Command::Host,
            CommandType::Completion => Command::Completion {
                prefix: argument.to_string(),
            },
            CommandType::Customize => Command::Customize(CustomizeCommand::parse(argument)),
        })
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Disconnect => CommandType::Disconnect,
            Command::Lookup { .. } => CommandType::Lookup,
            Command::Version => CommandType::Version,
            Command::Host => CommandType::Host,
            Command::Completion { .. } => CommandType::Completion,
            Command::Customize(_) => CommandType::Customize,
        }
    }

    /// Whether the connection stays open after this command
    pub fn keeps_open(&self) -> bool {
        !matches!(self, Command::Disconnect)
    }
}
