//! The tool-use conversation loop.
//!
//! Each query starts a fresh transcript: the tool catalog is listed, the model
//! is asked once with the tools declared, and every tool call in that first
//! response is executed and followed by exactly one tool-less model call.
//!
//! Tool calls are only chained one level deep. A tool call that shows up in a
//! follow-up response is logged and dropped, never executed.

use crate::Result;
use crate::model::{Backend, Message, ModelRequest, Part, Role, Usage};
use crate::shell::QueryHandler;
use crate::tools::{ToolCallRecord, ToolProvider};

/// Output of one query: the printed lines and the tools that ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub output: Vec<String>,
    pub tool_calls: Vec<ToolCallRecord>,
}

impl Transcript {
    /// The answer as shown to the user.
    pub fn text(&self) -> String {
        self.output.join("\n")
    }
}

/// Answers queries using a model backend and a borrowed tool provider.
pub struct Conversation<'a, P, B> {
    provider: &'a P,
    backend: &'a B,
}

impl<'a, P, B> Conversation<'a, P, B>
where
    P: ToolProvider,
    B: Backend,
{
    pub fn new(provider: &'a P, backend: &'a B) -> Self {
        Self { provider, backend }
    }

    /// Answer a query, returning the output lines joined by newlines.
    pub async fn answer(&self, query: &str) -> Result<String> {
        Ok(self.transcript(query).await?.text())
    }

    /// Answer a query, keeping the record of tool calls.
    pub async fn transcript(&self, query: &str) -> Result<Transcript> {
        let tools = self.provider.list_tools().await?;
        let mut messages = vec![Message::user(query)];

        let response = self
            .backend
            .call(ModelRequest {
                messages: &messages,
                tools: &tools,
            })
            .await?;
        log_usage(response.usage);

        let mut transcript = Transcript::default();
        let mut preceding_text: Option<String> = None;

        for part in response.message.parts {
            match part {
                Part::Text(text) => {
                    transcript.output.push(text.clone());
                    preceding_text = Some(text);
                }
                Part::ToolCall(call) => {
                    tracing::debug!(tool = %call.name, args = %call.input, "invoking tool");
                    let result = self
                        .provider
                        .call_tool(&call.name, call.input.clone())
                        .await?;
                    if result.is_error {
                        tracing::warn!(tool = %call.name, "tool reported an error");
                    }

                    transcript
                        .output
                        .push(format!("[Calling tool {} with args {}]", call.name, call.input));

                    if let Some(text) = preceding_text.take().filter(|t| !t.is_empty()) {
                        messages.push(Message::assistant(text));
                    }
                    messages.push(Message {
                        role: Role::User,
                        parts: result.content.iter().cloned().map(Part::Text).collect(),
                    });

                    transcript.tool_calls.push(ToolCallRecord {
                        tool_name: call.name,
                        arguments: call.input,
                        result,
                    });

                    let follow_up = self
                        .backend
                        .call(ModelRequest {
                            messages: &messages,
                            tools: &[],
                        })
                        .await?;
                    log_usage(follow_up.usage);

                    match follow_up.message.parts.into_iter().next() {
                        Some(Part::Text(text)) => transcript.output.push(text),
                        Some(Part::ToolCall(nested)) => {
                            tracing::warn!(tool = %nested.name, "follow-up tool call dropped");
                        }
                        None => tracing::warn!("model returned an empty follow-up response"),
                    }
                }
            }
        }

        Ok(transcript)
    }
}

impl<P, B> QueryHandler for Conversation<'_, P, B>
where
    P: ToolProvider,
    B: Backend,
{
    async fn answer(&self, query: &str) -> Result<String> {
        Ok(self.transcript(query).await?.text())
    }
}

fn log_usage(usage: Usage) {
    tracing::debug!(
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "model usage"
    );
}
