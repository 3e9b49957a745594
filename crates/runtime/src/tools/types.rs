//! Tool-related types.

use super::ToolError;
use rmcp::model::{CallToolResult, Tool};
use serde_json::{Map, Value};

/// A tool definition exposed to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub schema: Value,
}

impl From<Tool> for ToolSpec {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.into_owned(),
            description: tool.description.map(|d| d.into_owned()).unwrap_or_default(),
            schema: Value::Object((*tool.input_schema).clone()),
        }
    }
}

/// Arguments in the shape MCP expects: a JSON object, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments(pub Option<Map<String, Value>>);

impl TryFrom<Value> for ToolArguments {
    type Error = ToolError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(Some(map))),
            Value::Null => Ok(Self(None)),
            other => Err(ToolError::InvalidInput(format!(
                "tool arguments must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Content returned by a tool, flattened to text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub content: Vec<String>,
    /// Set when the server reported the call itself as failed.
    pub is_error: bool,
}

impl ToolOutput {
    /// A successful output with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            is_error: false,
        }
    }
}

impl From<CallToolResult> for ToolOutput {
    fn from(result: CallToolResult) -> Self {
        let content = result
            .content
            .iter()
            .map(|item| match item.as_text() {
                Some(text) => text.text.clone(),
                // Images, resources and the like are passed on as JSON.
                None => serde_json::to_string(item).unwrap_or_default(),
            })
            .collect();

        Self {
            content,
            is_error: result.is_error.unwrap_or(false),
        }
    }
}

/// One tool invocation made while answering a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRecord {
    pub tool_name: String,
    pub arguments: Value,
    pub result: ToolOutput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn arguments_accept_objects_and_null() {
        let args = ToolArguments::try_from(json!({"city": "Lyon"})).unwrap();
        let map = args.0.unwrap();
        assert_eq!(map.get("city"), Some(&json!("Lyon")));

        let none = ToolArguments::try_from(Value::Null).unwrap();
        assert_eq!(none, ToolArguments(None));
    }

    #[test]
    fn arguments_reject_non_objects() {
        let err = ToolArguments::try_from(json!(["Lyon"])).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[test]
    fn output_from_text_result() {
        let result = CallToolResult::success(vec![Content::text("18C, clear")]);
        let output = ToolOutput::from(result);
        assert_eq!(output, ToolOutput::text("18C, clear"));
    }

    #[test]
    fn output_keeps_error_flag() {
        let result = CallToolResult::error(vec![Content::text("unknown city")]);
        let output = ToolOutput::from(result);
        assert!(output.is_error);
        assert_eq!(output.content, vec!["unknown city".to_string()]);
    }

    #[test]
    fn non_text_content_is_passed_as_json() {
        let result = CallToolResult::success(vec![
            Content::text("chart attached"),
            Content::image("aGVsbG8=", "image/png"),
        ]);
        let output = ToolOutput::from(result);

        assert_eq!(output.content.len(), 2);
        assert_eq!(output.content[0], "chart attached");
        let image: Value = serde_json::from_str(&output.content[1]).unwrap();
        assert_eq!(image["type"], "image");
        assert_eq!(image["data"], "aGVsbG8=");
    }

    #[test]
    fn spec_from_mcp_tool() {
        let schema = json!({
            "type": "object",
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        });
        let Value::Object(map) = schema.clone() else {
            unreachable!()
        };
        let tool = Tool::new("get_weather", "Current weather for a city", Arc::new(map));

        let spec = ToolSpec::from(tool);
        assert_eq!(spec.name, "get_weather");
        assert_eq!(spec.description, "Current weather for a city");
        assert_eq!(spec.schema, schema);
    }
}
