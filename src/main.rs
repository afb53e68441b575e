use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use menusense::config::EngineConfig;
use menusense::detection::Detection;
use menusense::engine::MatchEngine;
use menusense::schema::MatchReport;
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "menusense",
    about = "Match food detector output against known menu compositions",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Use an explicit config file instead of the user config dir
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match detector output against the menu catalog
    Match(MatchArgs),
    /// Emit overlay records for the image annotator
    Overlays(OverlaysArgs),
    /// List the loaded menu rules
    Catalog(CatalogArgs),
    /// Print the JSON schema for match reports
    Schema,
}

#[derive(Args, Clone)]
struct MatchArgs {
    /// Detector output JSON; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Override the configured confidence floor
    #[arg(long, value_name = "FLOOR")]
    floor: Option<f32>,
}

#[derive(Args, Clone)]
struct CatalogArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct OverlaysArgs {
    /// Detector output JSON; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Override the configured confidence floor
    #[arg(long, value_name = "FLOOR")]
    floor: Option<f32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let color = stdout().is_terminal() && !cli.no_color;

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("cannot load config from {}", path.display()))?,
        None => EngineConfig::load(),
    };

    match cli.command {
        Commands::Match(args) => {
            if let Some(floor) = args.floor {
                config.confidence_floor = floor;
            }
            let engine = build_engine(config)?;
            let detections = read_detections(args.input.as_deref())?;
            let report = MatchReport::from_outcome(
                &engine.match_detections(&detections),
                engine.labels(),
            );
            if args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print!("{}", render_report(&report, color));
            }
        }
        Commands::Overlays(args) => {
            if let Some(floor) = args.floor {
                config.confidence_floor = floor;
            }
            let engine = build_engine(config)?;
            let detections = read_detections(args.input.as_deref())?;
            println!("{}", serde_json::to_string(&engine.overlays(&detections))?);
        }
        Commands::Catalog(args) => {
            let engine = build_engine(config)?;
            if args.json {
                println!("{}", serde_json::to_string(engine.catalog().rules())?);
            } else {
                print!("{}", render_catalog(&engine, color));
            }
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(MatchReport);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn build_engine(config: EngineConfig) -> Result<MatchEngine> {
    config.into_engine().context("invalid menu catalog")
}

fn read_detections(input: Option<&std::path::Path>) -> Result<Vec<Detection>> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("cannot read stdin")?,
    };
    serde_json::from_str(&content).context("invalid detector output JSON")
}

fn render_report(report: &MatchReport, color: bool) -> String {
    let mut out = String::new();

    let heading = if color {
        "Menu:".bold().cyan().to_string()
    } else {
        "Menu:".to_string()
    };
    let menu = if color {
        if report.matched() {
            report.predicted_menu.green().to_string()
        } else {
            report.predicted_menu.red().to_string()
        }
    } else {
        report.predicted_menu.clone()
    };
    out.push_str(&format!("{heading} {menu}\n"));

    if !report.components.is_empty() {
        let heading = if color {
            "Components:".bold().cyan().to_string()
        } else {
            "Components:".to_string()
        };
        out.push_str(&heading);
        out.push('\n');
        for component in &report.components {
            match component.confidence_percent {
                Some(percent) => {
                    out.push_str(&format!("  {} = {percent:.1}%\n", component.name));
                }
                None => out.push_str(&format!("  {}\n", component.name)),
            }
        }
    }

    out
}

fn render_catalog(engine: &MatchEngine, color: bool) -> String {
    let mut out = String::new();
    for rule in engine.catalog().rules() {
        let name = if color {
            rule.name.bold().cyan().to_string()
        } else {
            rule.name.clone()
        };
        out.push_str(&format!("{name}\n"));
        let must: Vec<&str> = rule.must_have.iter().map(|c| c.as_str()).collect();
        out.push_str(&format!("  must have: {}\n", must.join(", ")));
        if !rule.optional.is_empty() {
            let optional: Vec<&str> = rule.optional.iter().map(|c| c.as_str()).collect();
            out.push_str(&format!("  optional: {}\n", optional.join(", ")));
        }
    }
    out
}
