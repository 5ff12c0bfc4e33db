//! CLI commands implementation.

mod inspect;
mod render;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, Settings};

#[derive(Parser)]
#[command(name = "sitecontent")]
#[command(about = "Prerender and preview dynamic content for static sites")]
#[command(version)]
pub struct Cli {
    /// Config file (TOML, YAML, or JSON); discovered automatically if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Site root directory
    #[arg(long, global = true)]
    site_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the content containers of one or more pages
    Render {
        /// HTML pages to render
        #[arg(required = true)]
        pages: Vec<PathBuf>,
        /// Fetch data from a live site instead of the site root
        #[arg(long)]
        base_url: Option<String>,
        /// Write rendered pages here instead of in place
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Escape item field values
        #[arg(long)]
        escape: bool,
    },

    /// List the content containers a page has
    Inspect {
        /// HTML page to inspect
        page: PathBuf,
    },

    /// Serve the site with pages rendered on request
    Serve {
        /// Address to listen on (port, host, or host:port)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut settings, _config) = load_settings(cli.config.as_deref()).await?;
    apply_global_flags(&cli, &mut settings);

    match cli.command {
        Commands::Render {
            pages,
            base_url,
            out_dir,
            escape,
        } => {
            if base_url.is_some() {
                settings.base_url = base_url;
            }
            settings.escape_fields |= escape;
            render::cmd_render(&settings, &pages, out_dir.as_deref()).await
        }
        Commands::Inspect { page } => inspect::cmd_inspect(&page).await,
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                settings.bind = serve::parse_bind_address(&bind)?;
            }
            serve::cmd_serve(&settings).await
        }
    }
}

fn apply_global_flags(cli: &Cli, settings: &mut Settings) {
    if let Some(ref root) = cli.site_root {
        settings.site_root = root.clone();
    }
}
