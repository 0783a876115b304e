//! JSON-lines tool-call scripts.

use burrow::tools::{FsResponse, FsToolbox, INVALID_ARGUMENTS};
use serde::Deserialize;
use serde_json::Value;

/// One scripted tool call: `{"tool": "fs_ls", "args": {"path": "/"}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Call {
    /// Tool name
    pub tool: String,
    /// Tool arguments; omitted means defaults
    #[serde(default)]
    pub args: Value,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<Result<Call, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Run every call in `script`, in order, returning one response per call.
pub fn run(toolbox: &mut FsToolbox, script: &str) -> Vec<FsResponse> {
    script
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line).map(|call| (idx + 1, call)))
        .map(|(lineno, call)| match call {
            Ok(Call { tool, args }) => toolbox.call(&tool, args),
            Err(e) => {
                tracing::warn!(line = lineno, "skipping malformed call: {}", e);
                FsResponse::failure(INVALID_ARGUMENTS, format!("line {lineno}: {e}"))
            }
        })
        .collect()
}
