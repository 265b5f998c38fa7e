//! ExtractKit CLI - Command-line interface for extracting summarizable text

use clap::{Parser, Subcommand, ValueEnum};
use extractkit::{ExtractRequest, ExtractResponse, FileBlob, FileKind, Tool, TOOL_LLMTXT};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Content type sent for files with an unknown extension
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Output format for extract subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Text with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// ExtractKit - turn text, web pages and documents into one summarizable string
#[derive(Parser, Debug)]
#[command(name = "extractkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract and combine text from the given sources
    Extract {
        /// Raw text to include as-is
        #[arg(long)]
        text: Option<String>,

        /// Web page to fetch
        #[arg(long)]
        url: Option<String>,

        /// Document to parse (PDF, DOCX or plain text)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Content type of --file (inferred from its extension if omitted)
        #[arg(long, requires = "file")]
        content_type: Option<String>,

        /// Ceiling on combined output, in characters
        #[arg(long, conflicts_with = "no_limit")]
        max_chars: Option<usize>,

        /// Disable truncation
        #[arg(long)]
        no_limit: bool,

        /// URL fetch timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Extract {
            text,
            url,
            file,
            content_type,
            max_chars,
            no_limit,
            timeout,
            user_agent,
            output,
        }) => {
            let mut request = ExtractRequest::new();
            if let Some(text) = text {
                request = request.text(text);
            }
            if let Some(url) = url {
                request = request.url(url);
            }
            if let Some(path) = file {
                request = request.file(read_file(&path, content_type));
            }

            let mut builder = Tool::builder();
            if no_limit {
                builder = builder.unlimited();
            } else if let Some(max) = max_chars {
                builder = builder.max_chars(max);
            }
            if let Some(secs) = timeout {
                builder = builder.fetch_timeout(Duration::from_secs(secs));
            }
            if let Some(ua) = user_agent {
                builder = builder.user_agent(ua);
            }

            run_extract(&builder.build(), request, output).await;
        }
        None => {
            eprintln!("Usage: extractkit extract [--text TEXT] [--url URL] [--file PATH]");
            eprintln!("   or: extractkit --help");
            std::process::exit(1);
        }
    }
}

/// Load a file from disk as an upload
fn read_file(path: &Path, content_type: Option<String>) -> FileBlob {
    let bytes = std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    });
    let content_type = content_type.unwrap_or_else(|| infer_content_type(path).to_string());

    let mut blob = FileBlob::new(bytes, content_type);
    if let Some(name) = path.file_name() {
        blob = blob.filename(name.to_string_lossy());
    }
    blob
}

fn infer_content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileKind::from_extension)
        .map(|kind| kind.content_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

async fn run_extract(tool: &Tool, request: ExtractRequest, output: OutputFormat) {
    match tool.execute(request).await {
        Ok(response) => match output {
            OutputFormat::Md => writeln_safe(&format_md_with_frontmatter(&response)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&response).unwrap_or_else(|e| {
                    eprintln!("Error serializing response: {}", e);
                    std::process::exit(1);
                });
                writeln_safe(&json);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Format response as text with YAML frontmatter
fn format_md_with_frontmatter(response: &ExtractResponse) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    let sources = response
        .sources
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    output.push_str(&format!("sources: [{}]\n", sources));
    output.push_str(&format!("char_count: {}\n", response.char_count));
    if response.truncated == Some(true) {
        output.push_str("truncated: true\n");
    }
    output.push_str("---\n");
    output.push_str(&response.text);

    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
