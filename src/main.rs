use clap::{Parser, Subcommand};
use snipguide::registry::Registry;
use snipguide::types::Manifest;
use snipguide::{config, output, registry, scan, styleguide};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snipguide")]
#[command(about = "Snippet template indexer and bracketed-tag renderer")]
#[command(long_about = "\
Snippet template indexer and bracketed-tag renderer

Your template directory is the data source. Each file becomes a reusable
snippet identified by a bracketed tag, and the directory listing becomes a
persisted JSON manifest that drives rendering and the styleguide catalog.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── snippets.json                # Persisted manifest (written by `build`)
  └── snippet-templates/
      ├── quote.php                # [quote author=\"\"]...[/quote]
      ├── _debug-grid.php          # Underscore prefix = private
      ├── divider.html             # No tag syntax = raw HTML snippet
      └── buttons/                 # One level of subdirectories = categories
          ├── primary.php
          └── ghost.php

Each template opens with a documentation header (Title, Shortcode or HTML,
Styleguide preview overrides, Instructions) followed by the markup body.
`{{name}}` slots in the body are filled from tag attributes; `{{content}}`
receives the text between the opening and closing tag.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Override the configured environment mode
    #[arg(long, value_enum, global = true)]
    mode: Option<config::Mode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the template directory and rewrite the manifest
    Build,
    /// Validate the template directory without writing anything
    Check,
    /// Render the styleguide catalog to an HTML file
    Styleguide {
        /// Output file, relative to the current directory
        #[arg(long, default_value = "styleguide.html")]
        output: PathBuf,
    },
    /// Expand snippet tags in a content file and print the result
    Render {
        /// File containing bracketed snippet tags
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut site_config = config::load_config(&cli.source)?;
    if let Some(mode) = cli.mode {
        site_config.mode = mode;
    }

    match &cli.command {
        Command::Build => {
            let manifest = scan::scan(&site_config.templates_path(&cli.source), &cli.source)?;
            let manifest_path = site_config.manifest_path(&cli.source);
            manifest.write(&manifest_path)?;
            output::print_scan_output(&manifest, &manifest_path);

            let registry = Registry::from_manifest(&manifest, &cli.source, &site_config)?;
            output::print_build_output(&registry, None);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&site_config.templates_path(&cli.source), &cli.source)?;
            output::print_scan_output(&manifest, &site_config.manifest_path(&cli.source));
            Registry::from_manifest(&manifest, &cli.source, &site_config)?;
            println!("==> Templates are valid");
        }
        Command::Styleguide { output: out_file } => {
            let manifest = current_manifest(&site_config, &cli)?;
            let registry = Registry::from_manifest(&manifest, &cli.source, &site_config)?;
            let html = styleguide::render_catalog(&manifest, &registry);
            std::fs::write(out_file, html.into_string())?;
            output::print_build_output(&registry, Some(out_file.as_path()));
        }
        Command::Render { file } => {
            let manifest = current_manifest(&site_config, &cli)?;
            let registry = Registry::from_manifest(&manifest, &cli.source, &site_config)?;
            let content = std::fs::read_to_string(file)?;
            print!(
                "{}",
                registry.expand(&registry::fix_editor_artifacts(&content))
            );
        }
    }

    Ok(())
}

/// The manifest the current mode works from.
///
/// Build mode rescans the template directory on every invocation and
/// rewrites the persisted manifest; serve mode trusts the persisted copy
/// and treats a missing file as an empty site.
fn current_manifest(
    site_config: &config::SiteConfig,
    cli: &Cli,
) -> Result<Manifest, Box<dyn std::error::Error>> {
    match site_config.mode {
        config::Mode::Build => {
            let manifest = scan::scan(&site_config.templates_path(&cli.source), &cli.source)?;
            manifest.write(&site_config.manifest_path(&cli.source))?;
            Ok(manifest)
        }
        config::Mode::Serve => {
            Ok(Manifest::load(&site_config.manifest_path(&cli.source))?.unwrap_or_default())
        }
    }
}
