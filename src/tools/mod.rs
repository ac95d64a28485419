//! Tool System - the closed tool set, argument checks and dispatch

mod context;
mod definition;
mod error;
mod registry;

pub use context::ToolContext;
pub use definition::ToolKind;
pub use error::ToolError;
pub use registry::{Dispatched, ToolRegistry};
