use std::path::PathBuf;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::parser::StreamEventParser;
use crate::{AgentError, DisplayEvent, Result};

/// Capacity of the channel shared by the stdout and stderr readers.
const EVENT_BUFFER: usize = 64;

// ─── AgentOptions ─────────────────────────────────────────────────────────

/// How to launch the agent CLI.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Executable name or path. Defaults to `claude`.
    pub program: String,
    /// Arguments passed before anything else. The prompt is never an argument;
    /// it is written to stdin.
    pub args: Vec<String>,
    /// Working directory for the child. Inherits ours when `None`.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables.
    pub env: Vec<(String, String)>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            program: "claude".into(),
            args: default_args(),
            cwd: None,
            env: Vec::new(),
        }
    }
}

impl AgentOptions {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Non-interactive, permission-free, streaming JSON output.
pub fn default_args() -> Vec<String> {
    [
        "--dangerously-skip-permissions",
        "-p",
        "--output-format",
        "stream-json",
        "--verbose",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ─── AgentProcess ─────────────────────────────────────────────────────────

/// A running agent subprocess, consumed as a stream of [`DisplayEvent`]s.
///
/// stdout and stderr are each drained by a background task that owns a
/// private [`StreamEventParser`]. Both tasks forward into one bounded channel,
/// so events keep their order within a pipe but may interleave across pipes.
/// The stream ends once both pipes have closed; call [`AgentProcess::wait`]
/// afterwards for the exit status.
pub struct AgentProcess {
    child: Child,
    rx: mpsc::Receiver<DisplayEvent>,
}

impl AgentProcess {
    /// Spawn the agent and hand it `prompt` on stdin.
    ///
    /// Must be called from inside a Tokio runtime. `CLAUDECODE` is removed
    /// from the child's environment so the agent does not refuse to start when
    /// ralph itself runs inside an agent session.
    pub fn spawn(prompt: &str, opts: &AgentOptions) -> Result<Self> {
        let mut cmd = Command::new(&opts.program);
        cmd.args(&opts.args).env_remove("CLAUDECODE");
        for (k, v) in &opts.env {
            cmd.env(k, v);
        }
        if let Some(cwd) = &opts.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| AgentError::Spawn {
            program: opts.program.clone(),
            source,
        })?;
        tracing::debug!(program = %opts.program, pid = ?child.id(), "agent spawned");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AgentError::Process("stdout not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| AgentError::Process("stderr not captured".into()))?;

        // Write the prompt from a task so a child that never reads stdin
        // cannot block us; dropping the handle closes the pipe.
        if let Some(mut stdin) = child.stdin.take() {
            let prompt = prompt.to_owned();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                    tracing::debug!(error = %e, "agent closed stdin early");
                }
            });
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(pump(stdout, "stdout", tx.clone()));
        tokio::spawn(pump(stderr, "stderr", tx));

        Ok(Self { child, rx })
    }

    /// OS process id, if the child has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the child to exit. Non-zero exits become [`AgentError::Exit`].
    pub async fn wait(&mut self) -> Result<()> {
        let status = self.child.wait().await?;
        exit_result(status)
    }

    /// Kill the subprocess (best-effort; errors are logged and ignored).
    pub async fn kill(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!(error = %e, "kill failed");
        }
    }
}

impl Stream for AgentProcess {
    type Item = DisplayEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

fn exit_result(status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(AgentError::Exit { code }),
        None => Err(AgentError::Signal),
    }
}

/// Read `pipe` line by line and forward every non-empty display event.
///
/// Lines are split on raw bytes so invalid UTF-8 from the agent degrades to
/// replacement characters instead of ending the stream.
async fn pump<R>(pipe: R, source: &'static str, tx: mpsc::Sender<DisplayEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut parser = StreamEventParser::new();
    let mut lines = BufReader::new(pipe).split(b'\n');
    loop {
        let segment = match lines.next_segment().await {
            Ok(Some(segment)) => segment,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(source, error = %e, "agent pipe read failed");
                break;
            }
        };
        let line = String::from_utf8_lossy(&segment);
        let event = parser.parse_line(&line);
        if event.is_empty() {
            continue;
        }
        if tx.send(event).await.is_err() {
            // Receiver dropped; nobody is listening any more.
            break;
        }
    }
    tracing::trace!(source, "agent pipe closed");
}

// ─── Tests ────────────────────────────────────────────────────────────────
