//! Response definitions
//!
//! Represents responses to clients.

/// Outcome of a lookup or completion
///
/// The not-found marker happens to share its byte with the completion
/// selector; the two are kept separate on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Found,
    NotFound,
}

impl ResponseKind {
    /// Leading wire byte for this kind
    pub fn marker(self) -> char {
        match self {
            ResponseKind::Found => '1',
            ResponseKind::NotFound => '4',
        }
    }
}

/// A response to send to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing is written
    Empty,

    /// Candidates for a lookup or completion
    Found(Vec<String>),

    /// No entry for the given key or prefix
    NotFound(String),

    /// Free text answer (version, host)
    Info(String),
}

impl Response {
    /// Build a lookup/completion response from a dictionary result
    ///
    /// An empty candidate list is reported as not found.
    pub fn from_candidates(key: &str, candidates: Option<Vec<String>>) -> Self {
        match candidates {
            Some(candidates) if !candidates.is_empty() => Response::Found(candidates),
            _ => Response::NotFound(key.to_string()),
        }
    }

    /// Nothing goes on the wire for this response
    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Empty)
    }
}

/// Result of dispatching one request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: Response,

    /// False once the client asked to disconnect
    pub keep_open: bool,
}

impl Reply {
    /// Answer with `response`, keep the connection
    pub fn answer(response: Response) -> Self {
        Self {
            response,
            keep_open: true,
        }
    }

    /// Answer nothing, keep the connection
    pub fn silent() -> Self {
        Self::answer(Response::Empty)
    }

    /// Answer nothing, close the connection
    pub fn close() -> Self {
        Self {
            response: Response::Empty,
            keep_open: false,
        }
    }
}
