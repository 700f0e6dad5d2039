#![forbid(unsafe_code)]

//! Errors raised while assembling or driving a page.

use std::fmt;

/// Failure in the page layer or the browser adapter.
#[derive(Debug)]
pub enum WebError {
    /// The page configuration could not be parsed.
    Config(serde_json::Error),
    /// A controller program failed.
    Runtime {
        /// Controller name.
        controller: &'static str,
        /// Rendered runtime error.
        message: String,
    },
    /// No global `window` (not running in a browser).
    MissingWindow,
    /// The window has no document.
    MissingDocument,
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid page config: {e}"),
            Self::Runtime {
                controller,
                message,
            } => write!(f, "{controller}: {message}"),
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingDocument => write!(f, "window has no document"),
            Self::Js(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}
