use clap::Parser;
use forge::clipboard::ClipboardBackend;
use forge::logger::initialize_logger;
use forge::{Forge, ForgeConfig, ForgeOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Generate a single-file C++ source", long_about = None)]
struct CliArgs {
    #[arg(long, visible_alias = "remove-prints", help = "Remove lines starting with a debug print prefix")]
    remove_debug_lines: bool,
    #[arg(long, visible_alias = "run", help = "Compile and run the generated file")]
    compile_and_run: bool,
    #[arg(long, visible_alias = "copy", help = "Copy the generated file to the clipboard")]
    copy_to_clipboard: bool,
    #[arg(
        long,
        visible_alias = "single-class",
        default_value = "",
        help = "Only include the named class in the generated file"
    )]
    extract_single_type: String,
    #[arg(long, env = "FORGE_ROOT", help = "Project root holding the sources [default: current directory]")]
    root: Option<PathBuf>,
    #[arg(long, help = "JSON configuration file [default: <root>/forge.json when present]")]
    config: Option<PathBuf>,
    #[arg(long, help = "Ignore braces inside literals and comments when extracting a class")]
    literal_aware: bool,
    #[arg(long, value_enum, default_value_t = ClipboardBackend::Utility)]
    clipboard: ClipboardBackend,
    #[arg(short = 's', long, help = "Do not print per-file line statistics")]
    no_stats: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence")]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(e) = initialize_logger(args.verbose) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let config = match ForgeConfig::load(root, args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = ForgeOptions {
        remove_debug_lines: args.remove_debug_lines,
        compile_and_run: args.compile_and_run,
        copy_to_clipboard: args.copy_to_clipboard,
        single_type: args.extract_single_type,
        literal_aware: args.literal_aware,
        clipboard_backend: args.clipboard,
        show_stats: !args.no_stats,
    };

    match Forge::new(config).run(&options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
