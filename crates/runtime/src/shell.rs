//! Interactive line-oriented chat shell.

use std::future::Future;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{Error, Result};

const BANNER: &str = "MCP Client Chat Interface\nType your queries or 'quit' to exit.";
const PROMPT: &str = "\nQuery: ";

/// Something that can answer a user query.
pub trait QueryHandler: Send + Sync {
    fn answer(&self, query: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Reads queries from `input` and writes answers to `output`.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until `quit` or end of input.
    ///
    /// Errors from the handler are reported and the loop continues. Only
    /// failures of the shell's own input or output end the run early.
    pub async fn run<H: QueryHandler>(&mut self, handler: &H) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                break;
            }

            let query = line.trim();
            if query.eq_ignore_ascii_case("quit") {
                break;
            }
            if query.is_empty() {
                continue;
            }

            match handler.answer(query).await {
                Ok(response) => writeln!(self.output, "\n{response}")?,
                Err(e) => {
                    tracing::debug!("query failed: {e:?}");
                    writeln!(self.output, "\nError: {}", describe(&e))?;
                }
            }
        }

        Ok(())
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Human-readable message for a failed query.
fn describe(error: &Error) -> String {
    match error {
        Error::ModelService(e) => format!("model service failed: {e}"),
        Error::ToolInvocation(e) => format!("tool invocation failed: {e}"),
        other => other.to_string(),
    }
}
