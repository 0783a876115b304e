//! Burrow: an in-memory filesystem for agents
//!
//! Burrow gives an LLM agent a sandboxed scratch filesystem that lives only
//! as long as its session. The agent reaches it through a small set of tool
//! calls (`fs_info`, `fs_ls`, `fs_write`, `fs_mkdir`, `fs_read`, `fs_glob`,
//! `fs_grep`) that never touch the host's disk.

mod config;
pub mod tools;
mod vfs;

pub use config::{ConfigError, FsConfig};
pub use vfs::{
    ErrorKind, FileContent, FsError, FsResult, GrepMatch, GrepOptions, Info, NodeType, VirtualFs,
    WriteMode, path,
};
