use crate::errors::ForgeError;
use crate::process::{Invocation, ProcessRunner};
use crate::utils::read_file_content;
use arboard::Clipboard;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Unsupported(String),
}

impl Platform {
    pub fn detect() -> Self {
        Platform::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// The external program that reads clipboard content from stdin.
    pub fn clipboard_utility(&self) -> Option<Invocation> {
        match self {
            Platform::MacOs => Some(Invocation::new("pbcopy")),
            Platform::Windows => Some(Invocation::new("clip")),
            // Requires xclip to be installed
            Platform::Linux => Some(Invocation::new("xclip").arg("-selection").arg("clipboard")),
            Platform::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ClipboardBackend {
    /// Pipe through the platform's clipboard utility.
    #[default]
    Utility,
    /// Talk to the clipboard directly.
    Native,
}

pub struct ClipboardPublisher {
    runner: Arc<dyn ProcessRunner>,
    platform: Platform,
    backend: ClipboardBackend,
}

impl ClipboardPublisher {
    pub fn new(runner: Arc<dyn ProcessRunner>, backend: ClipboardBackend) -> Self {
        ClipboardPublisher {
            runner,
            platform: Platform::detect(),
            backend,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Copies the contents of `file_path` to the clipboard. Every failure is
    /// logged as a warning and reported as `false`.
    pub async fn publish(&self, file_path: &Path) -> bool {
        let content = match read_file_content(file_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                return false;
            }
        };

        let result = match self.backend {
            ClipboardBackend::Utility => self.copy_with_utility(&content).await,
            ClipboardBackend::Native => copy_native(content),
        };

        match result {
            Ok(true) => {
                info!("Copied {} to clipboard!", file_path.display());
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                false
            }
        }
    }

    async fn copy_with_utility(&self, content: &str) -> Result<bool, ForgeError> {
        let Some(invocation) = self.platform.clipboard_utility() else {
            if let Platform::Unsupported(os) = &self.platform {
                warn!("Unsupported OS: {}", os);
            }
            return Ok(false);
        };

        debug!("Piping {} bytes to {}", content.len(), invocation);
        let output = self.runner.run(&invocation, Some(content)).await?;
        if output.success() {
            Ok(true)
        } else {
            Err(ForgeError::ClipboardError(format!(
                "{} exited with {:?}: {}",
                invocation.program,
                output.exit_code,
                output.stderr.trim()
            )))
        }
    }
}

fn copy_native(content: String) -> Result<bool, ForgeError> {
    debug!("Initializing clipboard");
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(content)?;
    Ok(true)
}
