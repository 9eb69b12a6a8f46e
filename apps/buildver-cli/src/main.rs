use anyhow::Context;
use buildver_common::{Category, VersionEntry, VersionSnapshot};
use buildver_registry::VersionRegistry;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buildver-cli", about = "Report build versions and print the summary")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tool version and crate info
    Info,
    /// List the version categories
    Categories,
    /// Report versions and print the aggregated summary
    Report {
        /// Tool used during the build, as NAME=VERSION
        #[arg(long, value_name = "NAME=VERSION", value_parser = parse_pair)]
        tool: Vec<(String, String)>,
        /// Repository commit, as NAME=HASH
        #[arg(long, value_name = "NAME=HASH", value_parser = parse_pair)]
        commit: Vec<(String, String)>,
        /// Pre-built binary, as NAME=VERSION
        #[arg(long, value_name = "NAME=VERSION", value_parser = parse_pair)]
        binary: Vec<(String, String)>,
        /// Free-form information, as NAME=VALUE
        #[arg(long, value_name = "NAME=VALUE", value_parser = parse_pair)]
        info: Vec<(String, String)>,
        /// Any fact with its category named inline, as CATEGORY:NAME=VALUE
        #[arg(long, value_name = "CATEGORY:NAME=VALUE", value_parser = parse_entry)]
        entry: Vec<VersionEntry>,
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Info => {
            println!("buildver-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", buildver_common::crate_info());
            println!("registry: {}", buildver_registry::crate_info());
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!("{:<8} {}", category, category.description());
            }
        }
        Commands::Report {
            tool,
            commit,
            binary,
            info,
            entry,
            json,
        } => {
            let registry = buildver_registry::shared();
            report_all(registry, Category::Tool, tool)?;
            report_all(registry, Category::Commit, commit)?;
            report_all(registry, Category::Binary, binary)?;
            report_all(registry, Category::Info, info)?;
            for e in entry {
                let category = e.category;
                registry
                    .report_entry(e)
                    .with_context(|| format!("failed to report {category} version"))?;
            }

            let snapshot = registry.snapshot();
            tracing::info!(entries = snapshot.len(), "collected versions");
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render_table(&snapshot));
            }
        }
    }

    Ok(())
}

fn report_all(
    registry: &VersionRegistry,
    category: Category,
    pairs: Vec<(String, String)>,
) -> anyhow::Result<()> {
    for (name, value) in pairs {
        registry
            .report_entry(VersionEntry::new(name, value, category))
            .with_context(|| format!("failed to report {category} version"))?;
    }
    Ok(())
}

/// Parse a `NAME=VALUE` argument. The value may be empty; the name may not.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in {s:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a `CATEGORY:NAME=VALUE` argument, e.g. `commit:edk2=0f1e2d3c`.
fn parse_entry(s: &str) -> Result<VersionEntry, String> {
    let (category, pair) = s
        .split_once(':')
        .ok_or_else(|| format!("expected CATEGORY:NAME=VALUE, got {s:?}"))?;
    let category: Category = category.parse().map_err(|e| format!("{e}"))?;
    let (name, value) = parse_pair(pair)?;
    Ok(VersionEntry::new(name, value, category))
}

fn render_table(snapshot: &VersionSnapshot) -> String {
    if snapshot.is_empty() {
        return "no versions reported\n".to_string();
    }

    // `{:<w$}` pads by chars, not bytes.
    let name_width = snapshot
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:<8}  VALUE", "NAME", "CATEGORY");
    for info in snapshot.values() {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<8}  {}",
            info.name,
            info.category.as_str(),
            info.value
        );
    }
    out
}
