//! Tool-call surface over a [`VirtualFs`](crate::VirtualFs).
//!
//! Agents never call [`VirtualFs`](crate::VirtualFs) methods directly. They
//! send a tool name plus JSON arguments, and get back an [`FsResponse`]
//! envelope whether or not the call succeeded:
//!
//! ```rust
//! use burrow::tools::{FS_WRITE, FS_GREP, FsToolbox};
//! use serde_json::json;
//!
//! let mut toolbox = FsToolbox::default();
//! toolbox.call(FS_WRITE, json!({ "path": "/memories/todo.md", "content": "- ship it" }));
//!
//! let resp = toolbox.call(FS_GREP, json!({ "grep_pattern": "ship", "path": "/memories" }));
//! assert!(resp.is_ok());
//! ```

mod definition;
mod params;
mod response;
mod toolbox;

pub use definition::{
    ParamSpec, ParamType, ToolDefinition, ToolRegistry, ToolSummary, VecToolRegistry, render_index,
};
pub use params::{GlobArgs, GrepArgs, MkdirArgs, OneOrMany, PathArgs, ReadArgs, WriteArgs};
pub use response::{FsResponse, INVALID_ARGUMENTS, Status, UNKNOWN_TOOL};
pub use toolbox::{
    FS_GLOB, FS_GREP, FS_INFO, FS_LS, FS_MKDIR, FS_READ, FS_WRITE, FsToolbox, definitions,
};
