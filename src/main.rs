use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use convertmd::config::Config;
use convertmd::convert::{HtmdConverter, HtmlConverter};
use convertmd::format::format_all_markdown_files;
use convertmd::models::AppMode;
use convertmd::preview::render_page;
use convertmd::reformat::GeminiClient;
use convertmd::{Result, Workspace};

#[derive(Debug, Parser)]
#[command(name = "convertmd", version, about = "Markdown formatting and HTML to Markdown conversion")]
struct Cli {
    /// Path to a convertmd.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fix common Markdown syntax mistakes locally
    Format {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite the input file
        #[arg(long, requires = "input", conflicts_with = "output")]
        in_place: bool,
        /// Format every Markdown file under this directory
        #[arg(long, conflicts_with_all = ["input", "output", "in_place"])]
        dir: Option<PathBuf>,
    },
    /// Convert an HTML document to Markdown through the rich-text bridge
    Convert {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render Markdown to HTML
    Preview {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit a complete HTML page instead of a fragment
        #[arg(long)]
        page: bool,
    },
    /// Reformat text into Markdown with the remote language model
    Reformat {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the README template to a file
    Template {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let mut workspace = Workspace::new(HtmdConverter::new());

    match cli.command {
        Command::Format {
            input,
            output,
            in_place,
            dir,
        } => {
            if let Some(dir) = dir {
                let count = format_all_markdown_files(&dir)?;
                println!("Formatted {} file(s)", count);
                return Ok(());
            }

            import_input(&mut workspace, input.as_deref(), "stdin.md")?;
            workspace.format_markdown(config.format.delay()).await;

            let target = if in_place { input } else { output };
            write_output(&workspace, target.as_deref())
        }
        Command::Convert { input, output } => {
            workspace.set_mode(AppMode::TextConverter)?;
            import_input(&mut workspace, input.as_deref(), "stdin.html")?;
            write_output(&workspace, output.as_deref())
        }
        Command::Preview {
            input,
            output,
            page,
        } => {
            let name = import_input(&mut workspace, input.as_deref(), "stdin.md")?;

            let html = if page {
                render_page(workspace.markdown(), &name)
            } else {
                workspace.preview().unwrap_or_default()
            };
            emit(&html, output.as_deref())
        }
        Command::Reformat { input, output } => {
            import_input(&mut workspace, input.as_deref(), "stdin.txt")?;

            let client = GeminiClient::from_env(&config.reformat)?;
            workspace.auto_format(&client).await?;
            write_output(&workspace, output.as_deref())
        }
        Command::Template { output } => {
            workspace.load_readme_template();
            let target = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            workspace.export(&target)?;
            println!("Wrote {}", target.display());
            Ok(())
        }
    }
}

/// Import a file, or stdin under `stdin_name`, into the workspace's active
/// mode. Returns the name used for the document.
fn import_input<C: HtmlConverter>(
    workspace: &mut Workspace<C>,
    input: Option<&Path>,
    stdin_name: &str,
) -> Result<String> {
    match input {
        Some(path) => {
            workspace.import_path(path, None)?;
            Ok(path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default())
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            workspace.import_document(stdin_name, &bytes, None)?;
            Ok(stdin_name.to_string())
        }
    }
}

fn write_output<C: HtmlConverter>(
    workspace: &Workspace<C>,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => workspace.export(path),
        None => emit(workspace.active_output(), None),
    }
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
