//! Error types for the Targetprocess client.
//!
//! All variants are backend-level failures: the MCP layer converts them into
//! error-flagged tool results rather than protocol errors.

use miette::Diagnostic;
use thiserror::Error;

/// Targetprocess API operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum TpError {
    #[error("Failed to connect to Targetprocess")]
    #[diagnostic(
        code(tp_mcp::tp::connection_failed),
        help(
            "Is the configured domain reachable? Check TP_DOMAIN or the domain field of tp-mcp.json."
        )
    )]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    #[error("Targetprocess API error ({status}): {message}")]
    #[diagnostic(code(tp_mcp::tp::api_error))]
    Api { status: u16, message: String },

    #[error("Invalid response from Targetprocess: {message}")]
    #[diagnostic(
        code(tp_mcp::tp::invalid_response),
        help("The server returned data in an unexpected format. This might indicate an unsupported Targetprocess version.")
    )]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for TpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            TpError::Connection { source: e }
        } else {
            TpError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

/// Result type for Targetprocess operations.
pub type TpResult<T> = Result<T, TpError>;
