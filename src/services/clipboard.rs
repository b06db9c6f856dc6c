//! System clipboard access

use std::{env, process::Stdio, sync::Mutex};
use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info};

/// Destination for copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> Result<(), String>;
}

/// Clipboard backed by an external command reading the text on stdin
/// (`wl-copy`, `xclip`, `pbcopy`, `clip`)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace separated command line such as
    /// `"xclip -selection clipboard"`
    pub fn from_command_line(command_line: &str) -> Result<Self, String> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "Clipboard command is empty".to_string())?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Pick the usual clipboard tool for the current desktop session
    pub fn detect() -> Option<Self> {
        let detected = if env::var_os("WAYLAND_DISPLAY").is_some() {
            Some(Self::new("wl-copy", Vec::new()))
        } else if env::var_os("DISPLAY").is_some() {
            Some(Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            ))
        } else if cfg!(target_os = "macos") {
            Some(Self::new("pbcopy", Vec::new()))
        } else if cfg!(target_os = "windows") {
            Some(Self::new("clip", Vec::new()))
        } else {
            None
        };

        if let Some(clipboard) = &detected {
            info!("Using clipboard command: {}", clipboard.command_line());
        }
        detected
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn copy(&self, text: &str) -> Result<(), String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("Failed to execute {}: {}", self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| format!("Failed to write to {}: {}", self.program, e))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| format!("Failed to wait for {}: {}", self.program, e))?;
        if !status.success() {
            return Err(format!("{} exited with {}", self.program, status));
        }

        debug!("Copied {} bytes with {}", text.len(), self.program);
        Ok(())
    }
}

/// Process-local clipboard, used when no desktop clipboard is reachable
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently copied text
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .ok()
            .and_then(|history| history.last().cloned())
    }

    /// Number of copies performed so far
    pub fn copy_count(&self) -> usize {
        self.contents.lock().map(|history| history.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn copy(&self, text: &str) -> Result<(), String> {
        let mut history = self
            .contents
            .lock()
            .map_err(|e| format!("Failed to lock clipboard: {}", e))?;
        history.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_clipboard_keeps_last_write() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.copy("1700000000").await.unwrap();
        clipboard.copy("1700000005").await.unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("1700000005"));
        assert_eq!(clipboard.copy_count(), 2);
    }

    #[test]
    fn command_line_parsing() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.command_line(), "xclip -selection clipboard");
        assert!(CommandClipboard::from_command_line("   ").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_clipboard_reports_success_and_failure() {
        let ok = CommandClipboard::new("cat", Vec::new());
        assert!(ok.copy("1700000000").await.is_ok());

        let failing = CommandClipboard::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        assert!(failing.copy("1700000000").await.is_err());

        let missing = CommandClipboard::new("definitely-not-a-clipboard-tool", Vec::new());
        assert!(missing.copy("x").await.is_err());
    }
}
