use clap::{Parser, Subcommand};
use sitemap_gen::{catalog, config, generate, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sitemap-gen")]
#[command(about = "Generate sitemap.xml for the tools site")]
#[command(long_about = "\
Generate sitemap.xml for the tools site

With no arguments, reads sitemap.toml (optional), content.json and tools.json
from the current directory and writes the sitemap to every configured target
(public/sitemap.xml and dist/sitemap.xml by default).

Sources:
  static pages      from sitemap.toml [[static_pages]] (built-in table if absent)
  tool categories   keys of tools.json \"categories\"
  tools             tools.json \"tools\"
  blog categories   slugified tags of every post in content.json
  blog posts        content.json \"posts\"

Every URL must be https on the configured origin; anything else is dropped
and listed in the summary. Exits non-zero if a target cannot be written or
fails verification.

Set RUST_LOG=debug for per-URL diagnostics.")]
#[command(version)]
struct Cli {
    /// Pipeline config file
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Content catalog (blog posts)
    #[arg(long, default_value = "content.json", global = true)]
    content: PathBuf,

    /// Tool catalog (categories and tools)
    #[arg(long, default_value = "tools.json", global = true)]
    tools: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and write the sitemap (default)
    Build,
    /// Generate the sitemap in memory and report, without writing
    Check,
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_failure(&*e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.as_ref().unwrap_or(&Command::Build);
    if let Command::GenConfig = command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config)?;
    let content = catalog::load_content_catalog(&cli.content)?;
    let tools = catalog::load_tool_catalog(&cli.tools)?;
    for tool in tools.orphaned_tools() {
        tracing::warn!(tool = %tool.slug, category = %tool.category, "tool references an unknown category");
    }
    let generated_at = chrono::Utc::now();

    match command {
        Command::Check => {
            let document = generate::build_sitemap(&site_config, &content, &tools, generated_at)?;
            output::print_check(&document.stats, document.xml.len());
            output::print_stats(&document.stats);
        }
        _ => {
            let result = generate::generate(&site_config, &content, &tools, generated_at)?;
            output::print_success(&result.document.stats, &result.written);
            output::print_stats(&result.document.stats);
        }
    }
    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
