use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use canopy::catalog::{generate_catalog, CatalogEndpoint};
use canopy::fetch::{DirectUrls, FetchJson, HttpFetcher};
use canopy::model::{classify, BoundingBox};
use canopy::registry::NodeRegistry;
use canopy::resolve::{Reference, ResolveOptions, Resolver, I3S_CONVERSION_BASE};

#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Catalog resolver for OGC 3D Container and Tiles APIs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a container or landing page URL into a catalog tree
    Resolve {
        url: String,
        /// Filter to a bounding box (west,south,east,north)
        #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
        /// Depth cap for nested reference expansion
        #[arg(long, default_value_t = 8)]
        max_depth: usize,
        /// Base URL of the I3S conversion service
        #[arg(long)]
        i3s_base: Option<String>,
    },

    /// Fetch a URL and report which document shape it is
    Classify { url: String },

    /// Emit a seed catalog document for a list of name=url endpoints
    Catalog {
        /// Endpoints as name=url pairs
        endpoints: Vec<String>,
        /// Add a bbox-filtered sibling reference per endpoint
        #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            url,
            bbox,
            json,
            max_depth,
            i3s_base,
        } => {
            let mut registry = NodeRegistry::new();
            let fetcher = HttpFetcher::new()?;
            let options = ResolveOptions {
                max_depth,
                i3s_conversion_base: i3s_base
                    .unwrap_or_else(|| I3S_CONVERSION_BASE.to_string()),
            };
            let mut resolver = Resolver {
                registry: &mut registry,
                fetcher: &fetcher,
                rewriter: &DirectUrls,
                options,
            };
            let mut reference = Reference::new("root", &url);
            reference.bbox = bbox;

            let Some(root_id) = resolver.expand(&mut reference)? else {
                println!("Nothing to show at {}", url);
                return Ok(());
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&tree_json(&registry, &root_id))
                        .context("serialize tree")?
                );
            } else {
                print_tree(&registry, &root_id, 0);
            }
        }
        Commands::Classify { url } => {
            let fetcher = HttpFetcher::new()?;
            let parsed = url::Url::parse(&url).with_context(|| format!("parse url {}", url))?;
            let json = fetcher.fetch_json(&parsed)?;
            println!("{}", classify(&json).shape_name());
        }
        Commands::Catalog { endpoints, bbox } => {
            if endpoints.is_empty() {
                bail!("no endpoints given (expected name=url arguments)");
            }
            let endpoints = endpoints
                .iter()
                .map(|spec| {
                    let (name, url) = spec
                        .split_once('=')
                        .with_context(|| format!("endpoint {} is not name=url", spec))?;
                    Ok(CatalogEndpoint {
                        name: name.to_string(),
                        url: url.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let doc = generate_catalog(&endpoints, bbox.as_ref());
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).context("serialize catalog")?
            );
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "canopy=warn",
        1 => "canopy=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_tree(registry: &NodeRegistry, id: &str, depth: usize) {
    let Some(node) = registry.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let name = node.name().unwrap_or(id);
    match node.url() {
        Some(url) => println!("{}{} [{}] {}", indent, name, node.kind().as_str(), url),
        None => println!("{}{} [{}]", indent, name, node.kind().as_str()),
    }
    for member in node.members() {
        print_tree(registry, &member, depth + 1);
    }
}

fn tree_json(registry: &NodeRegistry, id: &str) -> Value {
    let Some(node) = registry.get(id) else {
        return Value::Null;
    };
    let mut desc = node.describe();
    let members = node.members();
    if !members.is_empty() {
        let nested = members
            .iter()
            .map(|member| tree_json(registry, member))
            .collect::<Vec<_>>();
        desc.insert("members".to_string(), Value::Array(nested));
    }
    Value::Object(desc)
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
    if parts.len() != 4 {
        return Err("expected west,south,east,north".to_string());
    }
    let mut edges = [0f64; 4];
    for (slot, part) in edges.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid bounding box edge {}", part))?;
    }
    Ok(BoundingBox::new(edges[0], edges[1], edges[2], edges[3]))
}
