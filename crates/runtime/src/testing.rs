//! In-memory fakes for the model backend and the tool provider.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::model::{
    Backend, Message, ModelError, ModelRequest, ModelResponse, Part, Role, ToolCall, Usage,
};
use crate::tools::{ToolError, ToolOutput, ToolProvider, ToolSpec};

pub fn text_reply(text: &str) -> Message {
    Message::assistant(text)
}

pub fn reply(parts: Vec<Part>) -> Message {
    Message {
        role: Role::Assistant,
        parts,
    }
}

pub fn tool_use(id: &str, name: &str, input: Value) -> Part {
    Part::ToolCall(ToolCall {
        id: id.into(),
        name: name.into(),
        input,
    })
}

pub fn spec(name: &str) -> ToolSpec {
    ToolSpec {
        name: name.into(),
        description: format!("{name} tool"),
        schema: serde_json::json!({"type": "object"}),
    }
}

/// A model request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSpec>,
}

/// Backend that replays canned responses in order.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<Message, ModelError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::default(),
        }
    }

    pub fn failing(error: ModelError) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Backend for ScriptedBackend {
    async fn call(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: request.messages.to_vec(),
            tools: request.tools.to_vec(),
        });
        let next = self.responses.lock().unwrap().pop_front();
        let message = next.unwrap_or_else(|| {
            Err(ModelError::InvalidResponse("no scripted response left".into()))
        })?;
        Ok(ModelResponse {
            message,
            usage: Usage::default(),
        })
    }
}

/// Tool provider that records every call it receives.
#[derive(Default)]
pub struct RecordingProvider {
    tools: Vec<ToolSpec>,
    outputs: HashMap<String, Result<ToolOutput, ToolError>>,
    calls: Mutex<Vec<(String, Value)>>,
    listings: AtomicUsize,
    closes: Arc<AtomicUsize>,
}

impl RecordingProvider {
    pub fn new(tools: Vec<ToolSpec>) -> Self {
        Self {
            tools,
            ..Self::default()
        }
    }

    pub fn with_output(mut self, tool: &str, output: Result<ToolOutput, ToolError>) -> Self {
        self.outputs.insert(tool.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    /// Counter bumped by `close`, readable after the provider is consumed.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

impl ToolProvider for RecordingProvider {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        self.outputs
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(ToolOutput::text(format!("{name} done"))))
    }

    async fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
