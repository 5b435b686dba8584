use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deckweave::DeckError;
use deckweave::cli::LlmOverrides;
use deckweave::cli::commands::{self, generate::GenerateOptions, preview::PreviewFormat};
use deckweave::cli::ui::Output;
use deckweave::config::ConfigFormat;

#[derive(Parser)]
#[command(name = "deckweave")]
#[command(
    version,
    about = "Turn topics, bullet lists and outlines into AI-enriched slide decks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the detected input shape
    Classify {
        #[arg(help = "Input text (reads --input or stdin when omitted)")]
        text: Option<String>,
        #[arg(long, short, help = "Read input text from a file")]
        input: Option<PathBuf>,
    },

    /// Parse and enrich input without writing files
    Preview {
        #[arg(help = "Input text (reads --input or stdin when omitted)")]
        text: Option<String>,
        #[arg(long, short, help = "Read input text from a file")]
        input: Option<PathBuf>,
        #[arg(long, help = "Skip speaker notes")]
        no_notes: bool,
        #[arg(short = 'f', long, value_enum, default_value = "text", help = "Output format")]
        format: PreviewFormat,
        #[arg(long, help = "LLM provider (openai, ollama, offline)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
    },

    /// Generate a presentation file
    Generate {
        #[arg(help = "Input text (reads --input or stdin when omitted)")]
        text: Option<String>,
        #[arg(long, short, help = "Read input text from a file")]
        input: Option<PathBuf>,
        #[arg(long, help = "Skip speaker notes")]
        no_notes: bool,
        #[arg(long, help = "Skip image references")]
        no_images: bool,
        #[arg(long, help = "Also export a PDF (requires soffice)")]
        pdf: bool,
        #[arg(long, short, help = "Theme: professional, modern, minimal")]
        theme: Option<String>,
        #[arg(long, short, help = "Output directory")]
        output: Option<PathBuf>,
        #[arg(long, help = "LLM provider (openai, ollama, offline)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Toml,
    Json,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, value_enum, default_value = "toml", help = "Output format")]
        format: ShowFormat,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdeckweave encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<DeckError>() {
            Some(err) => {
                Output::new().error(&format!("{}: {}", err.boundary_kind(), err));
                ExitCode::from(err.exit_code())
            }
            None => {
                Output::new().error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        },
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Classify { text, input } => {
            commands::classify::run(text, input.as_deref(), cli.verbose)?;
        }
        Commands::Preview {
            text,
            input,
            no_notes,
            format,
            provider,
            model,
        } => {
            commands::preview::run(commands::preview::PreviewOptions {
                text,
                input,
                no_notes,
                format,
                overrides: LlmOverrides { provider, model },
                verbose: cli.verbose,
            })?;
        }
        Commands::Generate {
            text,
            input,
            no_notes,
            no_images,
            pdf,
            theme,
            output,
            provider,
            model,
        } => {
            commands::generate::run(GenerateOptions {
                text,
                input,
                no_notes,
                no_images,
                pdf,
                theme,
                output,
                overrides: LlmOverrides { provider, model },
                verbose: cli.verbose,
            })?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(match format {
                    ShowFormat::Toml => ConfigFormat::Toml,
                    ShowFormat::Json => ConfigFormat::Json,
                })?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
