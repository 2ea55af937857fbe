//! element-helper CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use element_helper::preview::{encode_docs_uri, PreviewQuery, PreviewRenderer};
use element_helper::{CancellationFlag, CompletionEngine, DocumentView, HelperConfig, Position};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "element-helper")]
#[command(about = "Element UI completion and documentation for Vue templates")]
#[command(version)]
struct Cli {
    /// Config file (defaults to .element-helper.yaml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest completions at a cursor position
    Complete {
        /// File to analyze (use - for stdin)
        file: PathBuf,
        /// Cursor line (1-based)
        line: usize,
        /// Cursor column (1-based)
        column: usize,
        /// Document language id (defaults to the file extension, then vue)
        #[arg(short, long)]
        language: Option<String>,
        /// Knowledge base directory
        #[arg(short, long)]
        kb: Option<PathBuf>,
        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
    /// Render the documentation page for a component
    Preview {
        /// Component keyword or tag name, e.g. button or el-button
        keyword: String,
        /// Stylesheet for the page (defaults to style.css in the resource path)
        #[arg(short, long)]
        stylesheet: Option<PathBuf>,
    },
    /// Print the documentation identifier for a component
    Uri {
        /// Component keyword or tag name
        keyword: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "plain" | "text" => Ok(OutputFormat::Plain),
            _ => Err(format!("Unknown format: {}. Use 'json' or 'plain'", s)),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HelperConfig::load(path)?,
        None => HelperConfig::load_default(Path::new("."))?,
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Complete {
            file,
            line,
            column,
            language,
            kb,
            format,
        } => complete(&config, &file, line, column, language, kb, format),
        Commands::Preview {
            keyword,
            stylesheet,
        } => preview(&config, &keyword, stylesheet),
        Commands::Uri { keyword } => {
            let query = PreviewQuery::for_tag(&keyword, &config.preview.tag_prefix);
            println!("{}", encode_docs_uri(&query)?);
            Ok(())
        }
    }
}

fn init_logging(config: &HelperConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn complete(
    config: &HelperConfig,
    file: &Path,
    line: usize,
    column: usize,
    language: Option<String>,
    kb: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let (Some(line0), Some(column0)) = (line.checked_sub(1), column.checked_sub(1)) else {
        bail!("line and column are 1-based");
    };

    let source = if file.to_string_lossy() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };

    let kb_path = match kb {
        Some(path) => path,
        None => config
            .find_knowledge_base(Path::new("."))
            .context("no knowledge base found, pass --kb")?,
    };

    let engine =
        CompletionEngine::from_dir(&kb_path)?.with_settings(config.completion.clone());

    let language = language.unwrap_or_else(|| {
        file.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "vue".to_string())
    });

    tracing::info!(
        "Analyzing {}:{}:{} as {}",
        file.display(),
        line,
        column,
        language
    );

    let document = DocumentView::new(&source);
    let completions = engine.complete(
        &document,
        Position::new(line0, column0),
        &language,
        &CancellationFlag::new(),
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&completions)?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            for item in &completions {
                let detail = item.detail.as_deref().unwrap_or("");
                println!("{:<30} {:<10?} {}", item.label, item.kind, detail);
            }
        }
    }

    Ok(())
}

fn preview(config: &HelperConfig, keyword: &str, stylesheet: Option<PathBuf>) -> Result<()> {
    let renderer = match stylesheet {
        Some(path) => {
            let css = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
            PreviewRenderer::new(config.preview.clone(), css)
        }
        None => PreviewRenderer::load(config.preview.clone())?,
    };

    let query = PreviewQuery::for_tag(keyword, &config.preview.tag_prefix);
    println!("{}", renderer.render(&query));
    Ok(())
}
