//! Name-based dispatch of tool calls onto a [`VirtualFs`].

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use super::definition::{ParamSpec, ParamType, ToolDefinition, ToolRegistry, VecToolRegistry};
use super::params::{GlobArgs, GrepArgs, MkdirArgs, PathArgs, ReadArgs, WriteArgs};
use super::response::{FsResponse, INVALID_ARGUMENTS, UNKNOWN_TOOL};
use crate::{FsConfig, FsResult, VirtualFs};

/// `fs_info` tool name
pub const FS_INFO: &str = "fs_info";
/// `fs_ls` tool name
pub const FS_LS: &str = "fs_ls";
/// `fs_write` tool name
pub const FS_WRITE: &str = "fs_write";
/// `fs_mkdir` tool name
pub const FS_MKDIR: &str = "fs_mkdir";
/// `fs_read` tool name
pub const FS_READ: &str = "fs_read";
/// `fs_glob` tool name
pub const FS_GLOB: &str = "fs_glob";
/// `fs_grep` tool name
pub const FS_GREP: &str = "fs_grep";

/// Descriptors for the seven filesystem tools, in a stable order.
pub fn definitions() -> Vec<ToolDefinition> {
    use ParamType::{Boolean, Integer, String as Str};

    vec![
        ToolDefinition::new(
            FS_INFO,
            "Get metadata about a file or directory.\n\n\
             Returns {name, path, type} where type is \"file\" or \"directory\".",
            vec![ParamSpec::optional(
                "path",
                Str,
                json!("/"),
                "Path to the file or directory",
            )],
        ),
        ToolDefinition::new(
            FS_LS,
            "List the contents of a directory.\n\n\
             Returns one {name, path, type} entry per direct child.",
            vec![ParamSpec::optional(
                "path",
                Str,
                json!("/"),
                "Path to the directory",
            )],
        ),
        ToolDefinition::new(
            FS_WRITE,
            "Write content to a file, creating it if it doesn't exist.\n\n\
             The parent directory must exist. Without content the file is only \
             created. Returns the file's {name, path, type}.",
            vec![
                ParamSpec::required("path", Str, "Path to the file to write"),
                ParamSpec::optional(
                    "content",
                    Str,
                    Value::Null,
                    "Text to write; omit to only ensure the file exists",
                ),
                ParamSpec::optional(
                    "mode",
                    Str,
                    json!("overwrite"),
                    "\"overwrite\" replaces the content, \"append\" adds to the end",
                ),
            ],
        ),
        ToolDefinition::new(
            FS_MKDIR,
            "Create a directory, including any missing parent directories.\n\n\
             Fails if the path already exists.",
            vec![ParamSpec::required(
                "path",
                Str,
                "Path to the directory to create",
            )],
        ),
        ToolDefinition::new(
            FS_READ,
            "Read text from a file, optionally a range of lines.\n\n\
             Lines are 0-indexed; start is inclusive and end exclusive. Returns \
             {info, start, end, content}.",
            vec![
                ParamSpec::required("path", Str, "Path to the file to read"),
                ParamSpec::optional("start", Integer, Value::Null, "First line (inclusive)"),
                ParamSpec::optional("end", Integer, Value::Null, "Last line (exclusive)"),
            ],
        ),
        ToolDefinition::new(
            FS_GLOB,
            "Find files and directories matching a glob pattern.\n\n\
             Relative patterns are resolved against the working directory. \
             Supports *, **, ? and [...].",
            vec![ParamSpec::required(
                "pattern",
                Str,
                "Glob pattern, e.g. '*.md' or '/artifacts/**/*.txt'",
            )],
        ),
        ToolDefinition::new(
            FS_GREP,
            "Search for regex matches within files.\n\n\
             Searches one file, or every file under a directory. Patterns apply \
             to single lines. Returns one {path, snippet, line_number, \
             match_range, match} record per match.",
            vec![
                ParamSpec::required("grep_pattern", Str, "Regex to search for"),
                ParamSpec::required("path", Str, "File or directory to search"),
                ParamSpec::optional(
                    "file_name_pattern",
                    Str,
                    Value::Null,
                    "Glob(s) restricting which files are searched in a directory",
                )
                .or_list(),
                ParamSpec::optional(
                    "character_window",
                    Integer,
                    Value::Null,
                    "Characters of context around each match",
                ),
                ParamSpec::optional(
                    "line_window",
                    Integer,
                    Value::Null,
                    "Lines of context around each match (wins over character_window)",
                ),
                ParamSpec::optional(
                    "ignore_case",
                    Boolean,
                    json!(false),
                    "Match case-insensitively",
                ),
            ],
        ),
    ]
}

/// A filesystem plus the tools that operate on it.
#[derive(Debug, Clone)]
pub struct FsToolbox {
    fs: VirtualFs,
    registry: VecToolRegistry,
}

impl Default for FsToolbox {
    fn default() -> Self {
        Self::new(VirtualFs::new())
    }
}

impl FsToolbox {
    /// Wrap an existing filesystem.
    pub fn new(fs: VirtualFs) -> Self {
        Self {
            fs,
            registry: definitions().into_iter().collect(),
        }
    }

    /// Build a fresh filesystem from `config`.
    pub fn with_config(config: &FsConfig) -> FsResult<Self> {
        Ok(Self::new(VirtualFs::with_config(config)?))
    }

    /// The tool registry.
    pub fn registry(&self) -> &VecToolRegistry {
        &self.registry
    }

    /// The underlying filesystem.
    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    /// Mutable access to the underlying filesystem.
    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        &mut self.fs
    }

    /// Run the tool `name` with JSON `args`. `null` args count as `{}`.
    pub fn call(&mut self, name: &str, args: Value) -> FsResponse {
        if !self.registry.has_tool(name) {
            return FsResponse::failure(UNKNOWN_TOOL, format!("unknown tool: {name}"));
        }
        let args = if args.is_null() { json!({}) } else { args };
        debug!(tool = name, %args, "tool call");

        let response = match self.dispatch(name, args) {
            Ok(response) => response,
            Err(e) => FsResponse::failure(INVALID_ARGUMENTS, format!("{name}: {e}")),
        };
        if let Some(kind) = &response.kind {
            debug!(tool = name, kind = %kind, "tool call failed");
        }
        response
    }

    fn dispatch(&mut self, name: &str, args: Value) -> Result<FsResponse, serde_json::Error> {
        let fs = &mut self.fs;
        Ok(match name {
            FS_INFO => {
                let PathArgs { path } = parse(args)?;
                fs.info(&path).into()
            }
            FS_LS => {
                let PathArgs { path } = parse(args)?;
                fs.ls(&path).into()
            }
            FS_WRITE => {
                let WriteArgs {
                    path,
                    content,
                    mode,
                } = parse(args)?;
                fs.write(&path, content.as_deref(), mode).into()
            }
            FS_MKDIR => {
                let MkdirArgs { path } = parse(args)?;
                fs.mkdir(&path).into()
            }
            FS_READ => {
                let ReadArgs { path, start, end } = parse(args)?;
                fs.read(&path, start, end).into()
            }
            FS_GLOB => {
                let GlobArgs { pattern } = parse(args)?;
                fs.glob(&pattern).into()
            }
            FS_GREP => {
                let (pattern, path, options) = parse::<GrepArgs>(args)?.into_parts();
                fs.grep(&pattern, &path, &options).into()
            }
            other => FsResponse::failure(UNKNOWN_TOOL, format!("unknown tool: {other}")),
        })
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(args)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tools::Status;

    #[test]
    fn test_seven_tools_registered() {
        let toolbox = FsToolbox::default();
        let names: Vec<String> = toolbox
            .registry()
            .list_tools()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![FS_INFO, FS_LS, FS_WRITE, FS_MKDIR, FS_READ, FS_GLOB, FS_GREP]
        );
    }

    #[test]
    fn test_required_params_in_schema() {
        let grep = definitions()
            .into_iter()
            .find(|d| d.name == FS_GREP)
            .unwrap();
        assert_eq!(grep.parameters()["required"], json!(["grep_pattern", "path"]));

        let info = definitions()
            .into_iter()
            .find(|d| d.name == FS_INFO)
            .unwrap();
        assert_eq!(info.parameters()["required"], json!([]));
        assert_eq!(info.parameters()["properties"]["path"]["default"], "/");
    }

    #[test]
    fn test_null_args_use_defaults() {
        let mut toolbox = FsToolbox::default();
        let resp = toolbox.call(FS_INFO, Value::Null);
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(
            resp.response,
            Some(json!({ "name": "", "path": "/", "type": "directory" }))
        );
    }

    #[test]
    fn test_unknown_tool() {
        let mut toolbox = FsToolbox::default();
        let resp = toolbox.call("fs_rm", json!({ "path": "/" }));
        assert_eq!(resp.kind.as_deref(), Some(UNKNOWN_TOOL));
    }

    #[test]
    fn test_bad_arguments() {
        let mut toolbox = FsToolbox::default();
        let resp = toolbox.call(FS_READ, json!({ "start": 0 }));
        assert_eq!(resp.kind.as_deref(), Some(INVALID_ARGUMENTS));
        assert!(resp.error.unwrap().starts_with("fs_read:"));
    }

    #[test]
    fn test_fs_error_kind_in_envelope() {
        let mut toolbox = FsToolbox::default();
        let resp = toolbox.call(FS_MKDIR, json!({ "path": "/memories" }));
        assert_eq!(resp.kind.as_deref(), Some("already_exists"));
        assert!(resp.response.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let mut toolbox = FsToolbox::default();
        let resp = toolbox.call(
            FS_WRITE,
            json!({ "path": "/artifacts/a.md", "content": "one\ntwo" }),
        );
        assert!(resp.is_ok());

        let resp = toolbox.call(FS_READ, json!({ "path": "/artifacts/a.md", "start": 1 }));
        let body = resp.response.unwrap();
        assert_eq!(body["content"], "two");
        assert_eq!(body["start"], 1);
        assert_eq!(body["end"], 2);
        assert_eq!(body["info"]["type"], "file");
    }
}
