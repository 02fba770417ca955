use crate::config::ReleaseNotesConfig;
use crate::prelude::{eprintln, print, println, *};
use colored::Colorize;
use relnotes_core::release::{build_release_notes, FormattedDocument};
use relnotes_core::tickets::is_valid_base_url;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Debug, clap::Args, Clone)]
pub struct FormatOptions {
    /// Release-note lines to format (e.g., "- AB#1234 - fix login"). Reads --file or stdin when empty
    lines: Vec<String>,

    /// Read release notes from a file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Issue-tracker base URL ticket ids are appended to
    #[arg(short, long, env = "RELNOTES_BASE_URL")]
    base_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Module entry point
pub async fn run(options: FormatOptions, global: crate::Global) -> Result<()> {
    let config = ReleaseNotesConfig::from_env().with_overrides(options.base_url.clone());
    let base_url = config.base_url()?;

    if global.verbose {
        eprintln!("Base URL: {}", base_url);
        eprintln!();
    }

    if !is_valid_base_url(base_url) {
        log::warn!(
            "'{}' is not an absolute URL; release notes are left unchanged",
            base_url
        );
    }

    let input = read_input(&options).await?;
    let document = build_release_notes(&input, base_url);

    log::debug!(
        "formatted {} lines: {} changed, {} links created",
        document.lines_total,
        document.lines_changed,
        document.links_created
    );

    if options.json {
        output_json(&document)?;
    } else {
        output_formatted(&document);
    }

    Ok(())
}

/// Collect the release notes from arguments, a file, or stdin
async fn read_input(options: &FormatOptions) -> Result<String> {
    if !options.lines.is_empty() {
        log::debug!("reading {} lines from arguments", options.lines.len());
        return Ok(options.lines.join("\n"));
    }

    match &options.file {
        Some(path) => {
            log::debug!("reading release notes from {}", path.display());
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            Ok(content)
        }
        None => {
            log::debug!("reading release notes from stdin");
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read release notes from stdin")?;
            Ok(content)
        }
    }
}

fn output_json(document: &FormattedDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(document: &FormattedDocument) {
    if document.content.ends_with('\n') {
        print!("{}", document.content);
    } else {
        println!("{}", document.content);
    }

    // Summary goes to stderr and only when a person is watching
    if std::io::stdout().is_terminal() {
        eprintln!(
            "\n{}: {}  {}: {}  {}: {}",
            "Lines".green(),
            document.lines_total.to_string().bright_cyan().bold(),
            "Changed".green(),
            document.lines_changed.to_string().bright_cyan().bold(),
            "Links".green(),
            document.links_created.to_string().bright_cyan().bold()
        );
    }
}
