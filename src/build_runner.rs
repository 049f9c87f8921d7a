use crate::config::ForgeConfig;
use crate::process::{Invocation, ProcessRunner};
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs as async_fs;
use tracing::{debug, error, info, warn};

const OUTPUT_FRAME: &str =
    "================================================================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Compiled,
    Failed { diagnostics: String },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Compiled)
    }
}

/// Compiles a generated bundle and runs the result.
pub struct BuildRunner {
    runner: Arc<dyn ProcessRunner>,
    compiler: String,
    std_flag: String,
}

impl BuildRunner {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: &ForgeConfig) -> Self {
        debug!("Creating BuildRunner with {} {}", config.compiler, config.std_flag);
        BuildRunner {
            runner,
            compiler: config.compiler.clone(),
            std_flag: config.std_flag.clone(),
        }
    }

    pub fn compile_invocation(&self, source: &Path, output: &Path) -> Invocation {
        Invocation::new(&self.compiler)
            .arg(&self.std_flag)
            .arg(source.to_string_lossy())
            .arg("-o")
            .arg(output.to_string_lossy())
    }

    /// Compiles `source` into `output`. Failures are logged and returned,
    /// never raised.
    pub async fn build(&self, source: &Path, output: &Path) -> BuildStatus {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = async_fs::create_dir_all(parent).await {
                error!("Compilation failed: cannot create {}: {}", parent.display(), e);
                return BuildStatus::Failed {
                    diagnostics: e.to_string(),
                };
            }
        }

        let invocation = self.compile_invocation(source, output);
        info!("Compiling: {}", invocation);

        match self.runner.run(&invocation, None).await {
            Ok(result) if result.success() => {
                info!("Compiled successfully: {}", output.display());
                BuildStatus::Compiled
            }
            Ok(result) => {
                error!("Compilation failed:\n{}", result.stderr);
                BuildStatus::Failed {
                    diagnostics: result.stderr,
                }
            }
            Err(e) => {
                error!("Compilation failed: {}", e);
                BuildStatus::Failed {
                    diagnostics: e.to_string(),
                }
            }
        }
    }

    /// Runs the compiled binary with the console attached, between start and
    /// end markers. Returns the exit code when the program exited normally.
    pub async fn execute(&self, binary: &Path) -> Option<i32> {
        let binary = executable_path(binary);
        info!("Running: {}", binary.display());

        println!("\n{}", OUTPUT_FRAME);
        println!("Binary Output Start");
        println!("{}\n", OUTPUT_FRAME);

        let result = self
            .runner
            .run_attached(&Invocation::new(binary.to_string_lossy()))
            .await;

        println!("\n{}", OUTPUT_FRAME);
        println!("Binary Output End");
        println!("{}\n", OUTPUT_FRAME);

        match result {
            Ok(Some(0)) => Some(0),
            Ok(Some(code)) => {
                warn!("Program exited with code {}", code);
                Some(code)
            }
            Ok(None) => {
                warn!("Program was terminated by a signal");
                None
            }
            Err(e) => {
                warn!("Failed to run {}: {}", binary.display(), e);
                None
            }
        }
    }
}

/// `binary` with the platform's executable suffix, as the compiler names it.
pub fn executable_path(binary: &Path) -> PathBuf {
    if EXE_SUFFIX.is_empty() || binary.to_string_lossy().ends_with(EXE_SUFFIX) {
        return binary.to_path_buf();
    }
    let mut with_suffix = binary.as_os_str().to_owned();
    with_suffix.push(EXE_SUFFIX);
    PathBuf::from(with_suffix)
}
