//! mockplat CLI: build synthetic harnesses and inspect them.

use clap::{Args, Parser, Subcommand};
use mockplat_core::prelude::{Configuration, HarnessConfig};
use mockplat_harness::{parse_yaml_harness, Harness, HarnessDoc};
use mockplat_planner::{plan_density, ConversionOrigin};
use mockplat_platform::Platform;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mockplat")]
#[command(about = "Synthetic platforms and conversion graphs for optimizer testing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default, Clone)]
struct HarnessArgs {
    /// Harness description in YAML
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Number of synthetic platforms (overrides env and YAML)
    #[arg(long)]
    platforms: Option<usize>,

    /// Conversion-graph density in [0, 1] (overrides env and YAML)
    #[arg(long)]
    density: Option<f64>,

    /// Seed for random conversions (overrides env and YAML)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a harness and print its manifest as JSON
    Summary {
        #[command(flatten)]
        args: HarnessArgs,
    },

    /// Build a harness and list platforms, cost settings, and conversions
    Explain {
        #[command(flatten)]
        args: HarnessArgs,
    },

    /// Check a harness description without building it
    Validate {
        #[command(flatten)]
        args: HarnessArgs,
    },
}

fn main() {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { args } => {
            if let Err(e) = summary(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Explain { args } => {
            if let Err(e) = explain(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { args } => {
            if let Err(e) = validate(&args) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Harness description is valid");
        }
    }
}

fn load_doc(path: Option<&Path>) -> Result<Option<HarnessDoc>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let yaml_content = fs::read_to_string(path)?;
            Ok(Some(parse_yaml_harness(&yaml_content)?))
        }
        None => Ok(None),
    }
}

/// defaults < env < YAML < flags.
fn resolve_config(cfg: &mut HarnessConfig, doc: Option<&HarnessDoc>, args: &HarnessArgs) {
    if let Some(doc) = doc {
        doc.apply(cfg);
    }
    if let Some(n) = args.platforms {
        cfg.num_platforms = n;
    }
    if let Some(d) = args.density {
        cfg.density = d;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
}

fn build(args: &HarnessArgs) -> Result<Harness, Box<dyn std::error::Error>> {
    let doc = load_doc(args.spec.as_deref())?;
    let mut config = HarnessConfig::from_env();
    resolve_config(&mut config, doc.as_ref(), args);
    tracing::debug!(?config, "resolved harness config");

    let (catalog, properties) = match &doc {
        Some(doc) => (doc.operators()?, doc.configuration()),
        None => (None, Configuration::new()),
    };
    let harness = Harness::new(&config, catalog)?.with_properties(properties);
    Ok(harness)
}

fn summary(args: &HarnessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let harness = build(args)?;
    println!("{}", serde_json::to_string_pretty(harness.manifest())?);
    Ok(())
}

fn explain(args: &HarnessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let harness = build(args)?;
    let manifest = harness.manifest();

    println!("Synthetic Harness");
    println!("=================");
    println!();
    println!("Fingerprint: {}", manifest.fingerprint);
    println!(
        "Density: requested {:.3}, achieved {:.3}",
        manifest.requested_density, manifest.achieved_density
    );
    println!("Mappings: {}", manifest.num_mappings);
    println!();
    println!("Platforms:");
    for platform in harness.platforms() {
        let cost = platform.cost_settings(harness.properties());
        println!("  {} ({})", platform.name(), platform.configuration_name());
        println!("    non-reusable: {}", platform.non_reusable());
        println!("    reusable:     {}", platform.reusable());
        println!("    broadcast:    {}", platform.broadcast());
        println!(
            "    cpu: {} MHz x {} cores, hdfs: {} ms/MB, stretch: {}",
            cost.cpu_mhz, cost.cpu_cores, cost.hdfs_ms_per_mb, cost.stretch
        );
        println!(
            "    costs: {} fix + {} per ms",
            cost.costs_fix, cost.costs_per_ms
        );
    }
    println!();
    println!(
        "Conversions ({} channels, {} edges):",
        manifest.num_channels,
        manifest.num_conversions()
    );
    for (i, conversion) in harness.conversions().iter().enumerate() {
        let origin = match conversion.origin() {
            ConversionOrigin::Default => "default",
            ConversionOrigin::Random => "random",
        };
        println!("  {}. {} [{}]", i + 1, conversion, origin);
    }

    Ok(())
}

fn validate(args: &HarnessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_doc(args.spec.as_deref())?;
    let mut config = HarnessConfig::from_env();
    resolve_config(&mut config, doc.as_ref(), args);
    config.validate()?;
    if let Some(doc) = &doc {
        doc.operators()?;
    }
    let plan = plan_density(config.num_platforms, config.density)?;
    println!(
        "  {} platforms, {} channels, {} conversions ({} random)",
        config.num_platforms,
        plan.total_channels,
        plan.deterministic_count + plan.random_count,
        plan.random_count
    );
    Ok(())
}
