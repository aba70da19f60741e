//! Model Context Protocol (MCP) server implementation.
//!
//! The server uses the stdio transport: stdout carries the protocol stream,
//! so all diagnostics go to stderr via `tracing`.
//!
//! # Architecture
//!
//! - `server`: registry construction, dispatch, warm-up lifecycle
//! - `tools`: one module per tool group (search, entity CRUD, inspect)
//!
//! Errors split into two mutually exclusive channels: backend failures are
//! returned as error-flagged tool content, protocol violations (unknown
//! tool, malformed arguments) are raised as MCP errors.

pub mod server;
pub mod tools;

#[cfg(test)]
mod server_test;

pub use server::{TpServer, WarmupState};
