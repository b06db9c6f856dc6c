//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::Parser;
use tracing::warn;

use crate::services::{Clipboard, CommandClipboard, MemoryClipboard};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "epoch-desk")]
#[command(about = "Wall clock, epoch clock and offset epoch calculators")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Command that reads text on stdin and places it on the clipboard,
    /// e.g. "xclip -selection clipboard". Detected from the session when unset.
    #[arg(long)]
    pub clipboard_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the clipboard backend: the configured command, else the one
    /// detected for this session, else an in-memory clipboard
    pub fn clipboard(&self) -> Result<Arc<dyn Clipboard>, String> {
        if let Some(command_line) = &self.clipboard_command {
            return Ok(Arc::new(CommandClipboard::from_command_line(command_line)?));
        }

        match CommandClipboard::detect() {
            Some(clipboard) => Ok(Arc::new(clipboard)),
            None => {
                warn!("No system clipboard found, copies stay inside this process");
                Ok(Arc::new(MemoryClipboard::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["epoch-desk"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.clipboard_command.is_none());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "epoch-desk",
            "-p",
            "9000",
            "--host",
            "0.0.0.0",
            "--clipboard-command",
            "xclip -selection clipboard",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:9000");
        assert_eq!(config.log_level(), "debug");
        assert!(config.clipboard().is_ok());
    }

    #[test]
    fn empty_clipboard_command_is_rejected() {
        let config = Config::try_parse_from(["epoch-desk", "--clipboard-command", " "]).unwrap();
        assert!(config.clipboard().is_err());
    }
}
