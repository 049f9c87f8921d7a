use crate::build_runner::{BuildRunner, BuildStatus};
use crate::bundle::{BundleAssembler, BundleBody, BundleDocument};
use crate::clipboard::{ClipboardBackend, ClipboardPublisher, Platform};
use crate::collector::{HeaderCollector, SourceFragment};
use crate::config::ForgeConfig;
use crate::errors::ForgeError;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::reporting::print_stats;
use forge_extractor::{
    ExtractionError, LexicalBraceScanner, NaiveBraceScanner, SpanScanner, TypeExtractor,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ForgeOptions {
    pub remove_debug_lines: bool,
    pub compile_and_run: bool,
    pub copy_to_clipboard: bool,
    /// Empty keeps the whole bundle.
    pub single_type: String,
    pub literal_aware: bool,
    pub clipboard_backend: ClipboardBackend,
    pub show_stats: bool,
}

/// What a run produced, step by step.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub output_file: PathBuf,
    pub header_count: usize,
    pub extraction_error: Option<ExtractionError>,
    /// `None` when compile-and-run was not requested.
    pub build: Option<BuildStatus>,
    pub executed: bool,
    pub exit_code: Option<i32>,
    /// `None` when no clipboard copy was requested.
    pub copied: Option<bool>,
}

/// The whole bundling run: collect, assemble, write, then the optional
/// build, run and clipboard steps.
pub struct Forge {
    config: ForgeConfig,
    runner: Arc<dyn ProcessRunner>,
    platform: Option<Platform>,
}

impl Forge {
    pub fn new(config: ForgeConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemProcessRunner::new()))
    }

    pub fn with_runner(config: ForgeConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Forge {
            config,
            runner,
            platform: None,
        }
    }

    /// Overrides the detected platform used to pick a clipboard utility.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Only I/O and configuration problems are returned as errors; every
    /// later step degrades to a logged warning.
    pub async fn run(&self, options: &ForgeOptions) -> Result<PipelineReport, ForgeError> {
        debug!("Running forge with {:?}", options);
        let collector = HeaderCollector::new(&self.config);
        let headers = collector
            .collect(&self.config.source_dirs(), options.remove_debug_lines)
            .await?;
        let entry = collector
            .load_fragment(&self.config.main_file(), options.remove_debug_lines)
            .await?;

        let mut report = PipelineReport {
            output_file: self.config.output_file(),
            header_count: headers.len(),
            ..PipelineReport::default()
        };

        let document = self.bundle(&headers, &entry, options, &mut report);
        document.write_to(&report.output_file).await?;
        info!("Generated {}", self.config.label(&report.output_file));

        if options.show_stats {
            let mut fragments = headers;
            fragments.push(entry);
            print_stats(&fragments);
        }

        if options.compile_and_run {
            let builder = BuildRunner::new(self.runner.clone(), &self.config);
            let binary = self.config.binary_file();
            let status = builder.build(&report.output_file, &binary).await;
            if status.is_success() {
                report.exit_code = builder.execute(&binary).await;
                report.executed = true;
            }
            report.build = Some(status);
        }

        if options.copy_to_clipboard {
            let mut publisher =
                ClipboardPublisher::new(self.runner.clone(), options.clipboard_backend);
            if let Some(platform) = &self.platform {
                publisher = publisher.with_platform(platform.clone());
            }
            report.copied = Some(publisher.publish(&report.output_file).await);
        }

        Ok(report)
    }

    fn bundle(
        &self,
        headers: &[SourceFragment],
        entry: &SourceFragment,
        options: &ForgeOptions,
        report: &mut PipelineReport,
    ) -> BundleDocument {
        let assembler = BundleAssembler::new(&self.config);
        if options.single_type.is_empty() {
            return assembler.assemble(headers, BundleBody::Entry(entry));
        }

        let rendered: Vec<String> = headers.iter().map(SourceFragment::render).collect();
        let all_code = format!("{}\n{}", rendered.join("\n"), entry.content);
        match self.extractor(options).extract(&all_code, &options.single_type) {
            Ok(span) => assembler.assemble(headers, BundleBody::SingleType(span)),
            Err(e) => {
                warn!("{}", e);
                report.extraction_error = Some(e);
                assembler.assemble(headers, BundleBody::SingleType(""))
            }
        }
    }

    fn extractor(&self, options: &ForgeOptions) -> TypeExtractor {
        let scanner: Box<dyn SpanScanner> = if options.literal_aware {
            Box::new(LexicalBraceScanner)
        } else {
            Box::new(NaiveBraceScanner)
        };
        TypeExtractor::new()
            .with_keyword(self.config.type_keyword.clone())
            .with_scanner(scanner)
    }
}
