//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the orchestrator and documentation tools over stdio for AI
//! assistant integration.

pub mod server;

pub use server::McpServer;
