//! Static tool descriptors.
//!
//! Each filesystem operation is described once, declaratively: a name, a
//! description and a list of typed parameters with defaults. The JSON Schema
//! handed to a model is generated from that list, so the descriptor and the
//! schema cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// JSON Schema type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// A string
    String,
    /// An integer
    Integer,
    /// A boolean
    Boolean,
}

/// One parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name as it appears in call arguments.
    pub name: String,
    /// Accepted JSON type(s).
    pub types: Vec<ParamType>,
    /// Whether a list of `types` is also accepted.
    #[serde(default)]
    pub allow_list: bool,
    /// Human-readable description.
    pub description: String,
    /// Default value; `None` means the parameter is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A parameter the caller must supply.
    pub fn required(name: &str, ty: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![ty],
            allow_list: false,
            description: description.to_string(),
            default: None,
        }
    }

    /// A parameter with a default (use `Value::Null` for "absent").
    pub fn optional(name: &str, ty: ParamType, default: Value, description: &str) -> Self {
        Self {
            default: Some(default),
            ..Self::required(name, ty, description)
        }
    }

    /// Also accept a list of this parameter's type.
    pub fn or_list(mut self) -> Self {
        self.allow_list = true;
        self
    }

    /// Whether the caller must supply this parameter.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    fn schema(&self) -> Value {
        let mut variants: Vec<Value> = self
            .types
            .iter()
            .map(|ty| json!({ "type": ty }))
            .collect();
        if self.allow_list {
            let items: Vec<Value> = self.types.iter().map(|ty| json!({ "type": ty })).collect();
            variants.push(json!({ "type": "array", "items": one_of(items) }));
        }
        if matches!(self.default, Some(Value::Null)) {
            variants.push(json!({ "type": "null" }));
        }

        let mut schema = match one_of(variants) {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("anyOf".to_string(), other);
                map
            }
        };
        schema.insert("description".to_string(), json!(self.description));
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        Value::Object(schema)
    }
}

fn one_of(mut variants: Vec<Value>) -> Value {
    if variants.len() == 1 {
        variants.remove(0)
    } else {
        json!({ "anyOf": variants })
    }
}

/// Summary of a tool for index listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tool name (unique identifier).
    pub name: String,
    /// First line of the description.
    pub description: String,
}

/// Full definition of a tool: its descriptor plus the generated schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique identifier).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Typed parameters, in call order.
    pub params: Vec<ParamSpec>,
}

impl ToolDefinition {
    /// Create a tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params,
        }
    }

    /// JSON Schema (an `object` schema) for this tool's arguments.
    pub fn parameters(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Get a summary of this tool.
    pub fn summary(&self) -> ToolSummary {
        ToolSummary {
            name: self.name.clone(),
            description: self.description.lines().next().unwrap_or_default().to_string(),
        }
    }
}

/// Lookup of tool definitions by name.
pub trait ToolRegistry: Send + Sync {
    /// List all available tools (name and description only).
    fn list_tools(&self) -> Vec<ToolSummary>;

    /// Get the full definition of a specific tool.
    fn get_tool(&self, name: &str) -> Option<ToolDefinition>;

    /// Check if a tool exists.
    fn has_tool(&self, name: &str) -> bool {
        self.get_tool(name).is_some()
    }
}

/// Simple in-memory tool registry backed by a Vec.
#[derive(Debug, Default, Clone)]
pub struct VecToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl VecToolRegistry {
    /// Create a registry from a collection of tool definitions.
    pub fn with_tools(tools: impl IntoIterator<Item = ToolDefinition>) -> Self {
        Self {
            tools: tools.into_iter().collect(),
        }
    }

    /// All definitions, in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }
}

impl ToolRegistry for VecToolRegistry {
    fn list_tools(&self) -> Vec<ToolSummary> {
        self.tools.iter().map(ToolDefinition::summary).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolDefinition> {
        self.tools.iter().find(|t| t.name == name).cloned()
    }
}

impl FromIterator<ToolDefinition> for VecToolRegistry {
    fn from_iter<I: IntoIterator<Item = ToolDefinition>>(iter: I) -> Self {
        Self::with_tools(iter)
    }
}

/// Render a plain-text index, one tool per line with aligned descriptions.
///
/// ```text
/// fs_info     Get metadata about a file or directory.
/// fs_ls       List the contents of a directory.
/// ```
pub fn render_index(tools: &[ToolSummary]) -> String {
    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0) + 4;
    tools
        .iter()
        .map(|t| format!("{:<width$}{}\n", t.name, t.description, width = width))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> ToolDefinition {
        ToolDefinition::new(
            "fs_demo",
            "Demo tool.\n\nLonger text.",
            vec![
                ParamSpec::required("path", ParamType::String, "A path"),
                ParamSpec::optional("start", ParamType::Integer, Value::Null, "Start line"),
                ParamSpec::optional("flag", ParamType::Boolean, json!(false), "A flag"),
            ],
        )
    }

    #[test]
    fn test_required_list() {
        let schema = sample().parameters();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["path"]));
    }

    #[test]
    fn test_optional_null_default_is_nullable() {
        let schema = sample().parameters();
        let start = &schema["properties"]["start"];
        assert_eq!(start["default"], Value::Null);
        assert_eq!(
            start["anyOf"],
            json!([{ "type": "integer" }, { "type": "null" }])
        );
    }

    #[test]
    fn test_plain_default() {
        let schema = sample().parameters();
        let flag = &schema["properties"]["flag"];
        assert_eq!(flag["type"], "boolean");
        assert_eq!(flag["default"], false);
        assert_eq!(flag["description"], "A flag");
    }

    #[test]
    fn test_or_list() {
        let spec = ParamSpec::optional("filter", ParamType::String, Value::Null, "Globs").or_list();
        let schema = spec.schema();
        assert_eq!(
            schema["anyOf"],
            json!([
                { "type": "string" },
                { "type": "array", "items": { "type": "string" } },
                { "type": "null" }
            ])
        );
    }

    #[test]
    fn test_summary_uses_first_line() {
        assert_eq!(sample().summary().description, "Demo tool.");
    }

    #[test]
    fn test_registry_lookup() {
        let registry: VecToolRegistry = vec![sample()].into_iter().collect();
        assert!(registry.has_tool("fs_demo"));
        assert!(!registry.has_tool("fs_other"));
        assert_eq!(registry.list_tools().len(), 1);
    }

    #[test]
    fn test_render_index_alignment() {
        let tools = vec![
            ToolSummary {
                name: "a".into(),
                description: "Short".into(),
            },
            ToolSummary {
                name: "longer_name".into(),
                description: "Longer".into(),
            },
        ];
        let index = render_index(&tools);
        let lines: Vec<_> = index.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].find("Short"), lines[1].find("Longer"));
    }

    #[test]
    fn test_render_index_empty() {
        assert!(render_index(&[]).is_empty());
    }
}
