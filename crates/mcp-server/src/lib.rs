//! bucket-docs: read-only access to documents in an S3-compatible bucket.
//!
//! Two front ends share one `DocumentStore`:
//! - `http` - REST routes under `/documents` and JSON-RPC at `POST /mcp`
//! - `server` - an MCP server over stdio
//!
//! Both MCP paths answer from the same tool catalog and dispatcher, so tool
//! names, schemas, and output text are identical between them.

pub mod catalog;
pub mod config;
pub mod http;
pub mod rpc;
pub mod server;
pub mod tools;

pub use catalog::{Tool, ToolDescriptor, tool_catalog};
pub use config::{Config, ConfigError};
pub use server::DocumentServer;
pub use tools::{DispatchError, ToolOutcome, call_tool};
