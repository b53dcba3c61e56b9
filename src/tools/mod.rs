//! Tool dispatch facade.
//!
//! The operation catalog and the dispatcher that executes named operations
//! against the heuristics engine, the record store, and the GitHub client.

pub mod definitions;
pub mod dispatch;

pub use definitions::{tool_definitions, ToolDefinition};
pub use dispatch::ToolDispatcher;
