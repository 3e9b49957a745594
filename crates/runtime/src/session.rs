//! Session lifecycle: run the shell over a connected tool provider and always
//! release the provider afterwards.

use std::future::Future;
use std::io::Write;

use tokio::io::AsyncBufRead;

use crate::Result;
use crate::conversation::Conversation;
use crate::model::Backend;
use crate::shell::Shell;
use crate::tools::ToolProvider;

/// Run an interactive session.
///
/// The shell runs until it finishes, fails, or `shutdown` resolves (the
/// binary passes Ctrl-C). On each of those paths the provider is closed
/// exactly once before the shell's result is returned.
pub async fn run_session<P, B, R, W, S>(
    provider: P,
    backend: &B,
    shell: &mut Shell<R, W>,
    shutdown: S,
) -> Result<()>
where
    P: ToolProvider,
    B: Backend,
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let outcome = {
        let conversation = Conversation::new(&provider, backend);
        tokio::select! {
            outcome = shell.run(&conversation) => outcome,
            () = shutdown => {
                tracing::info!("interrupted, shutting down");
                Ok(())
            }
        }
    };

    provider.close().await;
    outcome
}
