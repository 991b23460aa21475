//! Dispatcher Module
//!
//! Maps one raw request line to a reply.
//!
//! ## Responsibilities
//! - Normalize request bytes into text
//! - Parse the command selector and argument
//! - Route lookups/completions to the dictionary service
//! - Run customize subcommands (reload)
//! - Turn every non-transport failure into silence
//!
//! Nothing here performs I/O on the socket; the connection handler owns
//! that. The dispatcher holds no locks of its own.

use std::sync::Arc;

use crate::config::DictionarySources;
use crate::dictionary::DictionaryService;
use crate::encoding::Normalizer;
use crate::error::Result;
use crate::protocol::{Command, CustomizeCommand, Reply, Response};

/// Request dispatcher shared by every connection
pub struct Dispatcher {
    /// Address reported by the host command
    listen_addr: String,

    /// Candidate storage
    dictionary: Arc<dyn DictionaryService>,

    /// Dictionary locations, read at reload time
    sources: Arc<dyn DictionarySources>,

    /// Request byte decoder
    normalizer: Box<dyn Normalizer>,
}

impl Dispatcher {
    pub fn new(
        listen_addr: impl Into<String>,
        dictionary: Arc<dyn DictionaryService>,
        sources: Arc<dyn DictionarySources>,
        normalizer: Box<dyn Normalizer>,
    ) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            dictionary,
            sources,
            normalizer,
        }
    }

    /// Dispatch one raw request line
    ///
    /// Decode failures, blank lines and unknown commands yield an empty
    /// reply with the connection kept open.
    pub fn dispatch(&self, raw: &[u8]) -> Reply {
        match self.try_dispatch(raw) {
            Ok(reply) => reply,
            Err(e) if e.is_silent() => {
                tracing::debug!("Ignoring request ({:?}): {}", e.class(), e);
                Reply::silent()
            }
            Err(e) => {
                tracing::warn!("Closing connection after dispatch failure: {}", e);
                Reply::close()
            }
        }
    }

    fn try_dispatch(&self, raw: &[u8]) -> Result<Reply> {
        let text = self.normalizer.normalize(raw)?;
        let command = Command::parse(&text)?;

        tracing::debug!("Request received: {:?}", command);
        Ok(self.execute(command))
    }

    /// Execute a parsed command
    pub fn execute(&self, command: Command) -> Reply {
        let keep_open = command.keeps_open();
        let response = match command {
            Command::Disconnect => Response::Empty,
            Command::Lookup { key } => {
                let candidates = self.dictionary.lookup(&key);
                Response::from_candidates(&key, candidates)
            }
            Command::Version => Response::Info(crate::version_string()),
            Command::Host => Response::Info(self.listen_addr.clone()),
            Command::Completion { prefix } => {
                let keys = self.dictionary.complete(&prefix);
                Response::from_candidates(&prefix, keys)
            }
            Command::Customize(sub) => {
                self.customize(sub);
                Response::Empty
            }
        };
        Reply { response, keep_open }
    }

    /// Run a customize subcommand; never answered
    fn customize(&self, sub: CustomizeCommand) {
        match sub {
            CustomizeCommand::Reload => {
                let sources = self.sources.dictionary_sources();
                tracing::info!("Reload requested for {} source(s)", sources.len());
                if let Err(e) = self.dictionary.reload(&sources) {
                    tracing::error!("Dictionary reload failed: {}", e);
                }
            }
            CustomizeCommand::Unknown(name) => {
                tracing::debug!("Ignoring unknown customize subcommand {:?}", name);
            }
        }
    }

    /// Address reported by the host command
    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }
}
