//! Clipboard backends
//!
//! Writes are best-effort: callers log a failure and move on.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::errors::{FormError, Result};

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Pick a backend from the configured command line, if any
pub fn from_command(command: Option<&str>) -> Arc<dyn Clipboard> {
    match command.and_then(CommandClipboard::parse) {
        Some(clipboard) => Arc::new(clipboard),
        None => Arc::new(NoClipboard),
    }
}

/// Pipes the text into an external program such as `wl-copy`, `xclip -selection clipboard` or `pbcopy`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                drop(stdin);
                // kill also waits, so the child is reaped before reporting
                let _ = child.kill().await;
                return Err(e.into());
            }
            // closing stdin signals end of input
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(FormError::ClipboardCommand(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Used when no clipboard command is configured
#[derive(Debug, Clone, Copy)]
pub struct NoClipboard;

#[async_trait]
impl Clipboard for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<()> {
        Err(FormError::ClipboardUnavailable)
    }
}

/// In-process clipboard keeping every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last(&self) -> Option<String> {
        self.writes.lock().await.last().cloned()
    }

    pub async fn writes(&self) -> Vec<String> {
        self.writes.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        self.writes.lock().await.push(text.to_string());
        Ok(())
    }
}
