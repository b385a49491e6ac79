//! Scrollfocus CLI
//!
//! Load a scene, bring a target into view, and report every scroll.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scrollfocus_core::prelude::*;
use scrollfocus_dom::{Document, NodeId, Scene};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::ScrollfocusConfig;

#[derive(Parser)]
#[command(name = "scrollfocus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Minimal scroll targeting for nested scroll containers", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: scrollfocus.toml next to the scene)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll containers until a target is in view
    Focus {
        /// Scene file (.toml or .json)
        scene: PathBuf,

        /// Element id to reveal
        #[arg(short, long)]
        target: Option<String>,

        /// Text range to reveal: <id>[/<child>]:<offset>[..<id>[/<child>]:<offset>]
        #[arg(short, long, conflicts_with_all = ["target", "at"])]
        range: Option<String>,

        /// Reveal a point in the target's box instead of the box: <x>,<y>
        #[arg(long, requires = "target")]
        at: Option<String>,

        /// Containers root to descendant (default: the target's scroll ancestors)
        #[arg(long, value_delimiter = ',')]
        containers: Vec<String>,

        /// Part of the target to aim at (e.g. "center middle")
        #[arg(long)]
        point: Option<String>,

        /// Part of the viewport to aim into
        #[arg(long)]
        to_point: Option<String>,

        /// Inset applied to every viewport edge
        #[arg(long)]
        padding: Option<f32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an element's box and frame chain
    Inspect {
        /// Scene file (.toml or .json)
        scene: PathBuf,

        /// Element id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Focus {
            scene,
            target,
            range,
            at,
            containers,
            point,
            to_point,
            padding,
            json,
        } => {
            let overrides = FocusConfig {
                point: point.as_deref().map(PointSpec::parse),
                to_point: to_point.as_deref().map(PointSpec::parse),
                padding,
                viewport: None,
            };
            let request = FocusRequest {
                target: target.as_deref(),
                range: range.as_deref(),
                at: at.as_deref(),
                containers: &containers,
            };
            cmd_focus(&scene, cli.config.as_deref(), &request, overrides, json)
        }

        Commands::Inspect { scene, id } => cmd_inspect(&scene, &id),
    }
}

struct FocusRequest<'a> {
    target: Option<&'a str>,
    range: Option<&'a str>,
    at: Option<&'a str>,
    containers: &'a [String],
}

#[derive(Serialize)]
struct StepOutput {
    container: String,
    window: bool,
    delta: [f32; 2],
    from: [f32; 2],
    requested: [f32; 2],
    to: [f32; 2],
    scrolled: bool,
}

#[derive(Serialize)]
struct ReportOutput {
    steps: Vec<StepOutput>,
    /// Final offset of every container, root to descendant
    offsets: Vec<(String, [f32; 2])>,
    target: [f32; 4],
}

fn cmd_focus(
    scene_path: &Path,
    config_path: Option<&Path>,
    request: &FocusRequest<'_>,
    overrides: FocusConfig,
    json: bool,
) -> Result<()> {
    let mut doc = load_document(scene_path)?;
    let config = load_config(scene_path, config_path)?;
    let focus = overrides.or(&config.focus);
    debug!(?focus, "effective focus options");

    let target = match (request.target, request.range) {
        (Some(_), Some(_)) => anyhow::bail!("--target and --range are mutually exclusive"),
        (None, Some(range)) => FocusTarget::Range(parse_range(&doc, range)?),
        (Some(id), None) => {
            let node = lookup(&doc, id)?;
            match request.at {
                Some(at) => FocusTarget::Point {
                    anchor: node,
                    point: parse_point(at)?,
                },
                None => FocusTarget::Element(node),
            }
        }
        (None, None) => anyhow::bail!("Nothing to focus: pass --target or --range"),
    };

    let containers = if request.containers.is_empty() {
        let anchor = match &target {
            FocusTarget::Element(node) => *node,
            FocusTarget::Range(range) => range.start.node,
            FocusTarget::Point { anchor, .. } => *anchor,
        };
        doc.scroll_ancestors(anchor)
    } else {
        request
            .containers
            .iter()
            .map(|id| lookup(&doc, id))
            .collect::<Result<Vec<_>>>()?
    };

    info!(
        "Focusing in {} container(s) from {}",
        containers.len(),
        scene_path.display()
    );
    let report = scroll_focus(&mut doc, &containers, &target, &focus)
        .context("Scroll focus aborted")?;

    let final_box = scrollfocus_core::measure_target(&doc, &target)?;
    let output = ReportOutput {
        steps: report
            .steps
            .iter()
            .map(|step| StepOutput {
                container: doc.label(step.container),
                window: step.window,
                delta: [step.delta.x, step.delta.y],
                from: [step.from.x, step.from.y],
                requested: [step.requested.x, step.requested.y],
                to: [step.to.x, step.to.y],
                scrolled: step.scrolled(),
            })
            .collect(),
        offsets: containers
            .iter()
            .filter_map(|&c| doc.scroll_offset(c).map(|s| (doc.label(c), [s.x, s.y])))
            .collect(),
        target: [final_box.left, final_box.top, final_box.right, final_box.bottom],
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if report.scrolled().next().is_none() {
        println!("Target already in view");
    }
    for step in &output.steps {
        println!(
            "{:<16} delta ({}, {})  scroll ({}, {}) -> ({}, {})",
            step.container,
            step.delta[0],
            step.delta[1],
            step.from[0],
            step.from[1],
            step.to[0],
            step.to[1]
        );
    }
    println!();
    for (label, offset) in &output.offsets {
        println!("{:<16} scroll ({}, {})", label, offset[0], offset[1]);
    }
    println!("target now at {}", final_box);

    Ok(())
}

fn cmd_inspect(scene_path: &Path, id: &str) -> Result<()> {
    let doc = load_document(scene_path)?;
    let node = lookup(&doc, id)?;

    let rect = doc.measure_box(&node)?;
    println!("{}", doc.label(node));
    println!("  box       {}", rect);
    println!("  absolute  {}", rect.absolute());
    if let Some(frame) = &rect.frame {
        println!("  frames    {}", frame);
    }
    if let Some(scroll) = doc.scroll_offset(node) {
        println!("  scroll    ({}, {})", scroll.x, scroll.y);
    }

    let ancestors: Vec<String> = doc
        .scroll_ancestors(node)
        .into_iter()
        .map(|c| doc.label(c))
        .collect();
    println!("  scrolled by {}", ancestors.join(" > "));

    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let scene =
        Scene::load(path).with_context(|| format!("Failed to load scene {}", path.display()))?;
    Document::from_scene(&scene).with_context(|| format!("Invalid scene {}", path.display()))
}

fn load_config(scene_path: &Path, explicit: Option<&Path>) -> Result<ScrollfocusConfig> {
    match explicit {
        Some(path) => ScrollfocusConfig::load(path),
        None => {
            let dir = scene_path.parent().unwrap_or_else(|| Path::new("."));
            ScrollfocusConfig::load_from_dir(dir)
        }
    }
}

fn lookup(doc: &Document, id: &str) -> Result<NodeId> {
    doc.get(id)
        .with_context(|| format!("No element with id '{}'", id))
}

/// `<id>[/<child>]:<offset>`
fn parse_boundary(doc: &Document, spec: &str) -> Result<Boundary<NodeId>> {
    let (node_part, offset) = spec
        .rsplit_once(':')
        .with_context(|| format!("Boundary '{}' is missing ':<offset>'", spec))?;
    let offset: usize = offset
        .parse()
        .with_context(|| format!("Invalid offset in '{}'", spec))?;

    let node = match node_part.split_once('/') {
        Some((id, child)) => {
            let parent = lookup(doc, id)?;
            let index: usize = child
                .parse()
                .with_context(|| format!("Invalid child index in '{}'", spec))?;
            *doc
                .children(parent)
                .get(index)
                .with_context(|| format!("'{}' has no child {}", id, index))?
        }
        None => lookup(doc, node_part)?,
    };
    Ok(Boundary::new(node, offset))
}

/// `<boundary>` (collapsed) or `<boundary>..<boundary>`
fn parse_range(doc: &Document, spec: &str) -> Result<TextRange<NodeId>> {
    match spec.split_once("..") {
        Some((start, end)) => Ok(TextRange::new(
            parse_boundary(doc, start)?,
            parse_boundary(doc, end)?,
        )),
        None => Ok(TextRange::collapsed(parse_boundary(doc, spec)?)),
    }
}

fn parse_point(spec: &str) -> Result<Point> {
    let (x, y) = spec
        .split_once(',')
        .with_context(|| format!("Point '{}' must be <x>,<y>", spec))?;
    Ok(Point::new(
        x.trim().parse().context("Invalid x")?,
        y.trim().parse().context("Invalid y")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfocus_dom::{ElementData, TextData, WindowState};

    fn doc_with_text() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new(WindowState::default());
        let para = doc
            .append_element(doc.body(), ElementData::new().id("p").size(200.0, 20.0))
            .unwrap();
        doc.append_text(para, TextData::new("one")).unwrap();
        let text = doc.append_text(para, TextData::new("two")).unwrap();
        (doc, para, text)
    }

    #[test]
    fn test_parse_range() {
        let (doc, para, text) = doc_with_text();
        let range = parse_range(&doc, "p/1:0..p/1:3").unwrap();
        assert_eq!(range.start, Boundary::new(text, 0));
        assert_eq!(range.end, Boundary::new(text, 3));

        let caret = parse_range(&doc, "p:2").unwrap();
        assert!(caret.is_collapsed());
        assert_eq!(caret.start, Boundary::new(para, 2));
    }

    #[test]
    fn test_parse_range_errors() {
        let (doc, _, _) = doc_with_text();
        assert!(parse_range(&doc, "p").is_err());
        assert!(parse_range(&doc, "p/5:0").is_err());
        assert!(parse_range(&doc, "missing:0").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10, 20.5").unwrap(), Point::new(10.0, 20.5));
        assert!(parse_point("10").is_err());
    }

    #[test]
    fn test_cli_rejects_range_with_target() {
        let both = Cli::try_parse_from([
            "scrollfocus",
            "focus",
            "scene.toml",
            "--target",
            "row",
            "--range",
            "p:0",
        ]);
        assert!(both.is_err());

        let at_without_target =
            Cli::try_parse_from(["scrollfocus", "focus", "scene.toml", "--at", "1,2"]);
        assert!(at_without_target.is_err());

        let range_only = Cli::try_parse_from(["scrollfocus", "focus", "scene.toml", "--range", "p:0"]);
        assert!(range_only.is_ok());
    }

    #[test]
    fn test_cli_parses_focus() {
        let cli = Cli::try_parse_from([
            "scrollfocus",
            "focus",
            "scene.toml",
            "--target",
            "row",
            "--containers",
            "window,list",
            "--padding",
            "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Focus {
                target,
                containers,
                padding,
                ..
            } => {
                assert_eq!(target.as_deref(), Some("row"));
                assert_eq!(containers, vec!["window", "list"]);
                assert_eq!(padding, Some(8.0));
            }
            Commands::Inspect { .. } => panic!("expected focus"),
        }
    }
}
