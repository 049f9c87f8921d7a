use crate::cleaner::CleanReport;
use crate::config::ForgeConfig;
use crate::errors::ForgeError;
use crate::ignore::ExcludePatterns;
use crate::utils::read_file_content;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// A cleaned source file, labelled with its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    pub label: String,
    pub content: String,
    pub report: CleanReport,
}

impl SourceFragment {
    /// The fragment as it appears in a bundle, under a banner naming its file.
    pub fn render(&self) -> String {
        format!("\n// ===== {} =====\n{}\n", self.label, self.content)
    }
}

pub struct HeaderCollector<'a> {
    config: &'a ForgeConfig,
    excludes: ExcludePatterns,
}

impl<'a> HeaderCollector<'a> {
    pub fn new(config: &'a ForgeConfig) -> Self {
        debug!(
            "Creating HeaderCollector for '.{}' files under {}",
            config.header_extension,
            config.root.display()
        );
        HeaderCollector {
            config,
            excludes: ExcludePatterns::new(&config.exclude),
        }
    }

    /// Header files under `dir`, recursively, sorted by path.
    pub fn find_headers(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.is_dir() {
            warn!("Header directory {} does not exist, skipping", dir.display());
            return Vec::new();
        }

        let mut headers = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking {}: {}", dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let is_header = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.config.header_extension);
            if !is_header {
                continue;
            }
            if self.excludes.should_exclude(self.config.label(entry.path())) {
                debug!("Excluding {}", entry.path().display());
                continue;
            }
            trace!("Found header: {}", entry.path().display());
            headers.push(entry.into_path());
        }

        headers.sort();
        headers
    }

    /// Reads and cleans every header under `dirs`, in directory order.
    pub async fn collect(
        &self,
        dirs: &[PathBuf],
        remove_debug_lines: bool,
    ) -> Result<Vec<SourceFragment>, ForgeError> {
        let mut fragments = Vec::new();
        for dir in dirs {
            debug!("Collecting headers from {}", dir.display());
            for path in self.find_headers(dir) {
                fragments.push(self.load_fragment(&path, remove_debug_lines).await?);
            }
        }
        info!("Collected {} header files", fragments.len());
        Ok(fragments)
    }

    pub async fn load_fragment(
        &self,
        path: &Path,
        remove_debug_lines: bool,
    ) -> Result<SourceFragment, ForgeError> {
        let raw = read_file_content(path).await?;
        let (content, report) = self
            .config
            .cleaning
            .clean_with_report(&raw, remove_debug_lines);
        let label = self.config.label(path);
        debug!(
            "Cleaned {}: kept {} lines, dropped {}",
            label,
            report.kept,
            report.dropped()
        );
        Ok(SourceFragment {
            label,
            content,
            report,
        })
    }
}
