use crate::collector::SourceFragment;
use crate::config::ForgeConfig;
use crate::errors::ForgeError;
use crate::utils::write_file_content;
use std::path::Path;
use tracing::debug;

pub const BANNER_RULE: &str = "// ==============================================";
const BANNER_TITLE: &str = "// Auto-generated single-file C++ source";

/// What follows the preamble in a bundle.
#[derive(Debug, Clone, Copy)]
pub enum BundleBody<'b> {
    /// Headers first, then the entry point under its own banner.
    Entry(&'b SourceFragment),
    /// Only an extracted type definition; headers are not emitted.
    SingleType(&'b str),
}

/// Blocks of a generated source file, joined with newlines on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDocument {
    blocks: Vec<String>,
}

impl BundleDocument {
    pub fn render(&self) -> String {
        self.blocks.join("\n")
    }

    /// Overwrites `path` with the rendered document.
    pub async fn write_to(&self, path: &Path) -> Result<(), ForgeError> {
        let rendered = self.render();
        write_file_content(path, &rendered).await?;
        debug!("Wrote {} bytes to {}", rendered.len(), path.display());
        Ok(())
    }
}

pub struct BundleAssembler<'a> {
    config: &'a ForgeConfig,
}

impl<'a> BundleAssembler<'a> {
    pub fn new(config: &'a ForgeConfig) -> Self {
        BundleAssembler { config }
    }

    pub fn assemble(&self, headers: &[SourceFragment], body: BundleBody<'_>) -> BundleDocument {
        let mut blocks = Vec::new();
        match body {
            BundleBody::Entry(entry) => {
                debug!(
                    "Assembling {} headers with entry point {}",
                    headers.len(),
                    entry.label
                );
                blocks.extend(self.banner(BANNER_TITLE.to_string()));
                blocks.extend(headers.iter().map(SourceFragment::render));
                blocks.extend(self.preamble());
                blocks.push(format!("\n// ===== {} =====\n", entry.label));
                blocks.push(entry.content.clone());
                blocks.push(format!("\n{}\n", BANNER_RULE));
            }
            BundleBody::SingleType(extracted) => {
                debug!("Assembling single type bundle ({} bytes)", extracted.len());
                blocks.extend(self.banner(format!("{} - Single class", BANNER_TITLE)));
                blocks.extend(self.preamble());
                blocks.push(extracted.to_string());
            }
        }
        BundleDocument { blocks }
    }

    fn banner(&self, title: String) -> Vec<String> {
        let mut banner = vec![
            BANNER_RULE.to_string(),
            title,
            "// Generated by forge".to_string(),
        ];
        if let Some(link) = &self.config.source_link {
            banner.push(format!("// Source: {}", link));
        }
        banner.push(BANNER_RULE.to_string());
        banner.push(String::new());
        banner
    }

    fn preamble(&self) -> Vec<String> {
        let mut preamble = self.config.preamble.clone();
        preamble.push(String::new());
        preamble
    }
}
