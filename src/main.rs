//! CLI entry point for `mimetree`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use mimetree::config::Config;
use mimetree::export::{json, text};
use mimetree::parser::{disposition, eml};
use mimetree::{Decoder, EmailPart};

#[derive(Parser)]
#[command(
    name = "mimetree",
    version,
    about = "Decode a raw email message into its MIME part tree",
    after_help = "Reads standard input when FILE is omitted or '-'."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message file to decode
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded part tree
    Show {
        path: Option<PathBuf>,
        /// Print full content instead of previews
        #[arg(long)]
        full: bool,
    },
    /// Print only the top-level decoded headers
    Headers { path: Option<PathBuf> },
    /// List leaf parts with type, charset, filename and size
    Parts { path: Option<PathBuf> },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Show the configuration file path and effective settings
    Config {
        /// Write the current settings to the configuration file
        #[arg(long)]
        init: bool,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mimetree::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let json = cli.json || config.output.format.eq_ignore_ascii_case("json");

    match cli.command {
        Some(Commands::Show { path, full }) => cmd_show(path.as_deref(), json, full, &config),
        Some(Commands::Headers { path }) => cmd_headers(path.as_deref(), json, &config),
        Some(Commands::Parts { path }) => cmd_parts(path.as_deref(), json, &config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Config { init }) => cmd_config(init, &config),
        Some(Commands::Manpage) => cmd_manpage(),
        None => cmd_show(cli.file.as_deref(), json, false, &config),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = mimetree::config::cache_dir(config);
    let log_file = mimetree::config::log_file_path(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender =
            tracing_appender::rolling::never(&log_dir, log_file.file_name().unwrap_or_default());
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Read and decode a message from `path`, or stdin when absent or `-`.
fn load(path: Option<&Path>, config: &Config) -> anyhow::Result<EmailPart> {
    let decoder = Decoder::new(config.decode.clone());
    let mut root = match path {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                anyhow::bail!("File not found: {}", p.display());
            }
            eml::decode_file(p, &decoder)?
        }
        _ => {
            let data = eml::read_from(std::io::stdin().lock())?;
            if data.is_empty() {
                anyhow::bail!("No message on standard input");
            }
            decoder.decode_bytes(&data)
        }
    };
    disposition::fill_filenames(&mut root);
    Ok(root)
}

fn cmd_show(path: Option<&Path>, json: bool, full: bool, config: &Config) -> anyhow::Result<()> {
    let root = load(path, config)?;
    if json {
        println!("{}", json::tree_to_json(&root)?);
    } else {
        let options = text::TextOptions {
            preview_chars: if full { 0 } else { config.output.preview_chars },
            ..Default::default()
        };
        print!("{}", text::render_tree(&root, &options));
    }
    Ok(())
}

fn cmd_headers(path: Option<&Path>, json: bool, config: &Config) -> anyhow::Result<()> {
    let root = load(path, config)?;
    if json {
        println!("{}", json::headers_to_json(&root.headers)?);
    } else {
        print!("{}", text::render_headers(&root.headers));
    }
    Ok(())
}

fn cmd_parts(path: Option<&Path>, json: bool, config: &Config) -> anyhow::Result<()> {
    let root = load(path, config)?;
    if json {
        let items: Vec<serde_json::Value> = root
            .leaves_with_path()
            .into_iter()
            .map(|(section, part)| {
                serde_json::json!({
                    "part": section,
                    "content_type": part.content_type(),
                    "charset": part.charset,
                    "filename": part.filename,
                    "size": part.content.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!();
        print!("{}", text::render_parts_table(&root));
        println!();
    }
    Ok(())
}

fn cmd_config(init: bool, config: &Config) -> anyhow::Result<()> {
    if init {
        let path = mimetree::config::save_config(config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    match mimetree::config::config_file_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no configuration directory"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mimetree", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
