//! In-memory virtual filesystem.
//!
//! This module provides:
//! - `VirtualFs` - The filesystem facade every tool call goes through
//! - Path resolution against a working directory (`path`)
//! - An owned tree of files and directories (`tree`)
//! - Glob matching and line-oriented regex search (`glob`, `grep`)
//!
//! A fresh filesystem looks like:
//! - `/memories/` - Notes the agent keeps for itself
//! - `/artifacts/` - Files produced for, or referenced by, the user

mod error;
mod filesystem;
mod glob;
mod grep;
mod info;
pub mod path;
mod tree;

pub use error::{ErrorKind, FsError, FsResult};
pub use filesystem::VirtualFs;
pub use grep::GrepOptions;
pub use info::{FileContent, GrepMatch, Info, NodeType, WriteMode};
