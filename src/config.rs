use crate::cleaner::CleaningRules;
use crate::errors::ForgeError;
use crate::utils::normalize_path;
use forge_extractor::DEFAULT_TYPE_KEYWORD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "forge.json";

/// Every path and rule the pipeline uses. Relative paths are resolved
/// against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    #[serde(skip)]
    pub root: PathBuf,
    pub source_dirs: Vec<PathBuf>,
    pub main_file: PathBuf,
    pub output_file: PathBuf,
    pub binary_file: PathBuf,
    pub header_extension: String,
    /// Glob patterns, matched against root-relative paths, for headers to skip.
    pub exclude: Vec<String>,
    pub cleaning: CleaningRules,
    pub preamble: Vec<String>,
    pub compiler: String,
    pub std_flag: String,
    pub type_keyword: String,
    pub source_link: Option<String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            root: PathBuf::from("."),
            source_dirs: vec![PathBuf::from("cp_util"), PathBuf::from("include")],
            main_file: PathBuf::from("main.cpp"),
            output_file: PathBuf::from("bin/combined.cpp"),
            binary_file: PathBuf::from("bin/combined"),
            header_extension: "hpp".to_string(),
            exclude: Vec::new(),
            cleaning: CleaningRules::default(),
            preamble: vec![
                "#include <bits/stdc++.h>".to_string(),
                "using namespace std;".to_string(),
            ],
            compiler: "g++".to_string(),
            std_flag: "-std=c++23".to_string(),
            type_keyword: DEFAULT_TYPE_KEYWORD.to_string(),
            source_link: None,
        }
    }
}

impl ForgeConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ForgeConfig {
            root: root.into(),
            ..ForgeConfig::default()
        }
    }

    /// Loads the configuration for `root`.
    ///
    /// An explicit `config_path` must exist. Without one, `forge.json` in the
    /// root is used when present and the defaults otherwise.
    pub async fn load(root: impl Into<PathBuf>, config_path: Option<&Path>) -> Result<Self, ForgeError> {
        let root = root.into();
        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if async_fs::try_exists(&candidate).await? {
                    Some(candidate)
                } else {
                    None
                }
            }
        };

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let raw = async_fs::read_to_string(&path).await.map_err(|e| {
                    ForgeError::ConfigError(format!("{}: {}", path.display(), e))
                })?;
                serde_json::from_str::<ForgeConfig>(&raw)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                ForgeConfig::default()
            }
        };
        config.root = root;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ForgeError> {
        let required = [
            ("header_extension", &self.header_extension),
            ("compiler", &self.compiler),
            ("type_keyword", &self.type_keyword),
            ("cleaning.guard_directive", &self.cleaning.guard_directive),
            ("cleaning.include_directive", &self.cleaning.include_directive),
            ("cleaning.universal_include", &self.cleaning.universal_include),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ForgeError::ConfigError(format!("{} must not be empty", name)));
            }
        }
        if self.cleaning.debug_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ForgeError::ConfigError(
                "cleaning.debug_prefixes must not contain empty prefixes".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.source_dirs.iter().map(|d| self.resolve(d)).collect()
    }

    pub fn main_file(&self) -> PathBuf {
        self.resolve(&self.main_file)
    }

    pub fn output_file(&self) -> PathBuf {
        self.resolve(&self.output_file)
    }

    pub fn binary_file(&self) -> PathBuf {
        self.resolve(&self.binary_file)
    }

    /// The `/`-separated path of `path` relative to the root, or the path
    /// itself when it lives outside the root.
    pub fn label(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        normalize_path(&relative.to_string_lossy())
    }
}
