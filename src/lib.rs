//! Targetprocess MCP server.
//!
//! This crate exposes a Targetprocess work-tracking instance as a fixed set
//! of Model Context Protocol tools served over stdio:
//!
//! - `search_entities` - query entities of one type with a filter expression
//! - `get_entity` - read a single entity by id
//! - `create_entity` - create a new entity
//! - `update_entity` - update fields of an existing entity
//! - `inspect_object` - list entity types or describe one type's schema
//!
//! # Architecture
//!
//! - `config`: connection configuration from env vars or a JSON file
//! - `tp`: the Targetprocess REST client behind the `EntityApi` trait
//! - `mcp`: the MCP server, tool registry, and tool implementations
//!
//! The server is generic over `A: EntityApi` (dependency inversion), so the
//! dispatch layer is tested against mocks and never touches the network.

pub mod config;
pub mod mcp;
pub mod tp;
