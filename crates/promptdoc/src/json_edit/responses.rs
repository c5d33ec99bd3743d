//! A [`PatchGenerator`] backed by an OpenAI Responses-style endpoint.
//!
//! The HTTP call itself is a [`ResponsesTransport`] supplied by the caller;
//! this module builds the request payload and validates the response.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::generator::{parse_generated_edit, EditRequest, GeneratedEdit, GeneratorError, PatchGenerator};
use crate::prompt_text::known_section_keys;

const SYSTEM_PROMPT: &str = "You are a JSON editor that outputs JSON Patch-like operations.\n\
Given instruction and currentJson, produce ONLY a JSON object with keys:\n\
- ops: array of operations\n\
- summary: string (Indonesian)\n\
- changedPaths: array of strings (dot paths)\n\
Operation format:\n\
- op: \"add\" | \"replace\" | \"remove\"\n\
- path: JSON Pointer path like \"/body/profile/height\"\n\
- valueText: (required for add/replace) MUST be a JSON string representing the value (e.g. \"\\\"abc\\\"\" for string, \"123\" for number, \"{...}\" for object).\n\
Rules:\n\
- Keep ops minimal (only what changes).\n\
- Preserve everything else.\n\
- If instruction is ambiguous, do minimal addition and mention it in summary.\n\
- Do NOT output the full updated JSON.\n";

const SCHEMA_NAME: &str = "json_patch_ops_v1";

/// Sends a request payload and returns the decoded response body.
///
/// Implementations own authentication and map non-success HTTP statuses to
/// [`GeneratorError::Transport`].
pub trait ResponsesTransport {
    fn post(&self, payload: &Value) -> Result<Value, GeneratorError>;
}

/// Request settings.
#[derive(Debug, Clone)]
pub struct ResponsesConfig {
    pub model: String,
    pub reasoning_effort: String,
    pub max_output_tokens: u32,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            model: "gpt-5".to_string(),
            reasoning_effort: "low".to_string(),
            max_output_tokens: 700,
        }
    }
}

impl ResponsesConfig {
    /// Defaults, with the model taken from `OPENAI_MODEL` when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }
}

#[derive(Debug, Serialize)]
struct Reasoning<'a> {
    effort: &'a str,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    format: Value,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    reasoning: Reasoning<'a>,
    text: TextFormat,
    max_output_tokens: u32,
    input: Vec<InputMessage<'a>>,
}

/// Generator that asks a Responses endpoint for patch operations.
pub struct ResponsesGenerator<T> {
    transport: T,
    config: ResponsesConfig,
}

impl<T: ResponsesTransport> ResponsesGenerator<T> {
    pub fn new(transport: T, config: ResponsesConfig) -> Self {
        Self { transport, config }
    }

    /// Build the request payload for `request`.
    pub fn build_payload(&self, request: &EditRequest<'_>) -> Result<Value, GeneratorError> {
        let user = json!({
            "instruction": request.instruction,
            "currentJson": request.document,
            "conventions": conventions(),
        });
        let user = serde_json::to_string_pretty(&user)
            .map_err(|e| GeneratorError::Transport(format!("cannot encode request: {e}")))?;

        let body = ResponsesRequest {
            model: &self.config.model,
            reasoning: Reasoning {
                effort: &self.config.reasoning_effort,
            },
            text: TextFormat {
                format: ops_format(),
            },
            max_output_tokens: self.config.max_output_tokens,
            input: vec![
                InputMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: user,
                },
            ],
        };
        serde_json::to_value(&body)
            .map_err(|e| GeneratorError::Transport(format!("cannot encode request: {e}")))
    }
}

impl<T: ResponsesTransport> PatchGenerator for ResponsesGenerator<T> {
    fn generate(&self, request: &EditRequest<'_>) -> Result<GeneratedEdit, GeneratorError> {
        let payload = self.build_payload(request)?;
        debug!(model = %self.config.model, "requesting patch ops");
        let response = self.transport.post(&payload)?;

        // A present, non-completed status usually means truncated output.
        if let Some(status) = response.get("status").and_then(Value::as_str) {
            if status != "completed" {
                return Err(GeneratorError::Incomplete {
                    status: status.to_string(),
                    error: error_text(&response),
                });
            }
        }

        let out = extract_output_text(&response);
        if out.is_empty() {
            return Err(GeneratorError::EmptyOutput {
                error: error_text(&response),
            });
        }
        parse_generated_edit(&out)
    }
}

/// Pull the model's text out of a Responses body.
///
/// Uses a non-blank top-level `output_text` when present, otherwise joins
/// the `output_text` parts of assistant messages with newlines.
pub fn extract_output_text(response: &Value) -> String {
    if let Some(text) = response.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }
    let Some(items) = response.get("output").and_then(Value::as_array) else {
        return String::new();
    };

    let mut chunks: Vec<&str> = Vec::new();
    for item in items {
        if item.get("type").and_then(Value::as_str) != Some("message")
            || item.get("role").and_then(Value::as_str) != Some("assistant")
        {
            continue;
        }
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(Value::as_str) == Some("output_text") {
                if let Some(text) = part.get("text").and_then(Value::as_str) {
                    chunks.push(text);
                }
            }
        }
    }
    chunks.join("\n").trim().to_string()
}

fn error_text(response: &Value) -> String {
    match response.get("error") {
        None | Some(Value::Null) => String::new(),
        Some(err) => err.to_string(),
    }
}

/// Hints sent alongside the document.
fn conventions() -> Value {
    json!({
        "knownSections": known_section_keys(),
        "commonAdditions": {
            "bodyProfileTemplate": {
                "height": "",
                "build": "",
                "proportions": "",
                "notes": ""
            }
        }
    })
}

/// Strict JSON schema for the `{ops, summary, changedPaths}` object.
fn ops_format() -> Value {
    json!({
        "type": "json_schema",
        "name": SCHEMA_NAME,
        "strict": true,
        "schema": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "ops": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "op": {"type": "string", "enum": ["add", "replace", "remove"]},
                            "path": {"type": "string"},
                            "valueText": {"type": "string"}
                        },
                        "required": ["op", "path"]
                    }
                },
                "summary": {"type": "string"},
                "changedPaths": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["ops", "summary", "changedPaths"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::Op;
    use std::cell::RefCell;

    struct Canned {
        response: Value,
        seen: RefCell<Option<Value>>,
    }

    impl Canned {
        fn new(response: Value) -> Self {
            Self {
                response,
                seen: RefCell::new(None),
            }
        }
    }

    impl ResponsesTransport for Canned {
        fn post(&self, payload: &Value) -> Result<Value, GeneratorError> {
            *self.seen.borrow_mut() = Some(payload.clone());
            Ok(self.response.clone())
        }
    }

    fn request(doc: &Value) -> EditRequest<'_> {
        EditRequest {
            instruction: "tambahkan tinggi 170cm",
            document: doc,
        }
    }

    #[test]
    fn payload_shape() {
        let doc = json!({"body": {"type": "slim"}});
        let generator = ResponsesGenerator::new(Canned::new(json!({})), ResponsesConfig::default());
        let payload = generator.build_payload(&request(&doc)).unwrap();

        assert_eq!(payload["model"], "gpt-5");
        assert_eq!(payload["reasoning"]["effort"], "low");
        assert_eq!(payload["max_output_tokens"], 700);
        assert_eq!(payload["text"]["format"]["name"], SCHEMA_NAME);
        assert_eq!(payload["input"][0]["role"], "system");

        let user: Value = serde_json::from_str(payload["input"][1]["content"].as_str().unwrap()).unwrap();
        assert_eq!(user["currentJson"], doc);
        assert_eq!(user["conventions"]["knownSections"][10], "global_negative_prompt");
    }

    #[test]
    fn generates_from_output_text() {
        let body = json!({
            "status": "completed",
            "output_text": r#"{"ops":[{"op":"add","path":"/body/profile/height","valueText":"\"170cm\""}],"summary":"ok","changedPaths":[]}"#
        });
        let transport = Canned::new(body);
        let generator = ResponsesGenerator::new(transport, ResponsesConfig::default());
        let doc = json!({});
        let edit = generator.generate(&request(&doc)).unwrap();
        assert_eq!(edit.ops, vec![Op::add("/body/profile/height", &json!("170cm"))]);
        assert!(generator.transport.seen.borrow().is_some());
    }

    #[test]
    fn rejects_incomplete_response() {
        let generator = ResponsesGenerator::new(
            Canned::new(json!({"status": "incomplete", "error": {"code": "max_tokens"}})),
            ResponsesConfig::default(),
        );
        let doc = json!({});
        let err = generator.generate(&request(&doc)).unwrap_err();
        assert_eq!(
            err,
            GeneratorError::Incomplete {
                status: "incomplete".into(),
                error: r#"{"code":"max_tokens"}"#.into()
            }
        );
    }

    #[test]
    fn rejects_empty_output() {
        let generator = ResponsesGenerator::new(Canned::new(json!({"output": []})), ResponsesConfig::default());
        let doc = json!({});
        let err = generator.generate(&request(&doc)).unwrap_err();
        assert_eq!(err, GeneratorError::EmptyOutput { error: String::new() });
    }

    #[test]
    fn extracts_assistant_chunks() {
        let body = json!({
            "output_text": "   ",
            "output": [
                {"type": "reasoning", "content": [{"type": "output_text", "text": "no"}]},
                {"type": "message", "role": "user", "content": [{"type": "output_text", "text": "no"}]},
                {"type": "message", "role": "assistant", "content": [
                    {"type": "output_text", "text": "{\"ops\":"},
                    {"type": "refusal", "text": "no"},
                    {"type": "output_text", "text": "[]}"}
                ]}
            ]
        });
        assert_eq!(extract_output_text(&body), "{\"ops\":\n[]}");
    }
}
