use crate::errors::ForgeError;
use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The only way the crate starts external programs.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs to completion with captured output, feeding `stdin` when given.
    async fn run(&self, invocation: &Invocation, stdin: Option<&str>) -> Result<ProcessOutput, ForgeError>;

    /// Runs to completion with the parent's stdio attached.
    async fn run_attached(&self, invocation: &Invocation) -> Result<Option<i32>, ForgeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        SystemProcessRunner
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, invocation: &Invocation, stdin: Option<&str>) -> Result<ProcessOutput, ForgeError> {
        debug!("Spawning: {}", invocation);
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ForgeError::ProcessError(format!("Failed to start {}: {}", invocation.program, e))
            })?;

        // stdin is fed while the output pipes drain so an echoing child cannot block
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
                trace!("Writing {} bytes to stdin of {}", input.len(), invocation.program);
                pipe.write_all(input.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(|e| {
            ForgeError::ProcessError(format!("Failed to wait for {}: {}", invocation.program, e))
        })?;
        fed.map_err(|e| {
            ForgeError::ProcessError(format!("Failed to write to {}: {}", invocation.program, e))
        })?;
        trace!("{} exited with {:?}", invocation.program, output.status.code());

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn run_attached(&self, invocation: &Invocation) -> Result<Option<i32>, ForgeError> {
        debug!("Running attached: {}", invocation);
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .await
            .map_err(|e| {
                ForgeError::ProcessError(format!("Failed to start {}: {}", invocation.program, e))
            })?;
        Ok(status.code())
    }
}
