mod config;

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use selfmap_core::constants::{OPACITY_RANGE, SIZE_SCALE_RANGE};
use selfmap_core::{
    Category, Dataset, DisplayConfig, EntryFilter, RadiusMode, SizeMetric, build_report,
    build_scene, compute_positions, compute_weighted_degrees, dataset_schema, export_json,
    import_json, ring_guides, sample_dataset, synthetic_dataset, unknown_relations,
};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "selfmap", version, about = "Self map radial layout engine")]
struct Cli {
    /// Settings file (TOML); defaults to $SELFMAP_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full renderable scene as JSON
    Scene {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        display: DisplayArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Dim every entry not connected to this label
        #[arg(long)]
        focus: Option<String>,
    },

    /// Print label → position as JSON
    Positions {
        #[command(flatten)]
        source: Source,
        /// Radius mode: valence or power
        #[arg(long)]
        radius_mode: Option<RadiusMode>,
    },

    /// Print label → normalized weighted degree as JSON
    Degrees {
        #[command(flatten)]
        source: Source,
    },

    /// Print the reference ring polylines as JSON
    Rings,

    /// Check that a dataset file parses
    Validate {
        /// Dataset file path
        path: PathBuf,
    },

    /// Summarize a dataset
    Report {
        #[command(flatten)]
        source: Source,
        /// Number of most connected entries to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Print a dataset: the built-in sample, or a random one
    Sample {
        /// Generate this many random entries instead of the built-in sample
        #[arg(long)]
        random: Option<usize>,
        /// Seed for --random
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Print the JSON Schema of the dataset format
    Schema,
}

#[derive(Args)]
struct Source {
    /// Dataset file path
    file: Option<PathBuf>,

    /// Use the built-in sample dataset
    #[arg(long, conflicts_with = "file")]
    sample: bool,
}

#[derive(Args)]
struct DisplayArgs {
    /// Radius mode: valence or power
    #[arg(long)]
    radius_mode: Option<RadiusMode>,

    /// Size metric: power, valence_abs, power_x_valence, weighted_degree
    #[arg(long)]
    size_metric: Option<String>,

    /// Omit association edges
    #[arg(long)]
    no_edges: bool,

    /// Omit marker labels
    #[arg(long)]
    no_labels: bool,

    /// Marker size multiplier
    #[arg(long)]
    size_scale: Option<f64>,

    /// Marker opacity
    #[arg(long)]
    opacity: Option<f64>,
}

#[derive(Args)]
struct FilterArgs {
    /// Keep entries whose label or category contains this text
    #[arg(long)]
    search: Option<String>,

    /// Keep only these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
}

impl DisplayArgs {
    /// Flags override the settings file.
    fn apply(&self, mut display: DisplayConfig) -> DisplayConfig {
        if let Some(mode) = self.radius_mode {
            display.radius_mode = mode;
        }
        if let Some(name) = &self.size_metric {
            let metric = SizeMetric::from_str_lossy(name);
            if metric.as_str() != name && name != "power_x_val" {
                tracing::warn!("unknown size metric '{name}', using {metric}");
            }
            display.size_metric = metric;
        }
        if self.no_edges {
            display.show_edges = false;
        }
        if self.no_labels {
            display.show_labels = false;
        }
        if let Some(scale) = self.size_scale {
            display.size_scale = scale;
        }
        if let Some(opacity) = self.opacity {
            display.opacity = opacity;
        }
        display
    }
}

impl FilterArgs {
    fn to_filter(&self) -> Result<EntryFilter> {
        let mut categories = BTreeSet::new();
        for name in &self.categories {
            let Some(category) = Category::from_name(name) else {
                let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                bail!("unknown category '{name}'; expected one of: {}", known.join(", "));
            };
            categories.insert(category);
        }
        Ok(EntryFilter {
            query: self.search.clone(),
            categories: (!categories.is_empty()).then_some(categories),
        })
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Scene {
            source,
            display,
            filter,
            focus,
        } => cmd_scene(&settings, source, display, filter, focus.as_deref()),
        Commands::Positions {
            source,
            radius_mode,
        } => cmd_positions(&settings, source, *radius_mode),
        Commands::Degrees { source } => cmd_degrees(source),
        Commands::Rings => cmd_rings(&settings),
        Commands::Validate { path } => cmd_validate(path),
        Commands::Report { source, top } => cmd_report(source, *top),
        Commands::Sample { random, seed } => cmd_sample(*random, *seed),
        Commands::Schema => print_json(&dataset_schema()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let dataset =
        import_json(&json).with_context(|| format!("failed to parse {}", path.display()))?;
    let unknown = unknown_relations(&json);
    if !unknown.is_empty() {
        let names: Vec<&str> = unknown.iter().map(String::as_str).collect();
        tracing::warn!(
            "unknown relation(s) {} treated as associates_with",
            names.join(", ")
        );
    }
    tracing::debug!(
        "loaded {} entries and {} associations from {}",
        dataset.entries.len(),
        dataset.associations.len(),
        path.display()
    );
    Ok(dataset)
}

fn load_dataset(source: &Source) -> Result<Dataset> {
    let dataset = match (&source.file, source.sample) {
        (Some(path), _) => read_dataset(path)?,
        (None, true) => sample_dataset().context("built-in sample is malformed")?,
        (None, false) => bail!("no dataset given: pass a FILE or --sample"),
    };
    warn_dangling(&dataset);
    Ok(dataset)
}

/// Associations naming unknown labels are ignored by the engine; surface them.
fn warn_dangling(dataset: &Dataset) {
    let labels: HashSet<&str> = dataset.entries.iter().map(|e| e.label.as_str()).collect();
    let dangling = dataset
        .associations
        .iter()
        .filter(|a| !labels.contains(a.src.as_str()) || !labels.contains(a.dst.as_str()))
        .count();
    if dangling > 0 {
        tracing::warn!("{dangling} association(s) reference unknown entries and will be skipped");
    }
    if labels.len() != dataset.entries.len() {
        tracing::warn!("dataset contains duplicate labels; their markers will overlap");
    }
}

fn warn_out_of_range(cfg: &DisplayConfig) {
    let (lo, hi) = SIZE_SCALE_RANGE;
    if !(lo..=hi).contains(&cfg.size_scale) {
        tracing::warn!(
            "size scale {} is outside the recommended range [{lo}, {hi}]",
            cfg.size_scale
        );
    }
    let (lo, hi) = OPACITY_RANGE;
    if !(lo..=hi).contains(&cfg.opacity) {
        tracing::warn!(
            "opacity {} is outside the recommended range [{lo}, {hi}]",
            cfg.opacity
        );
    }
}

fn cmd_scene(
    settings: &Settings,
    source: &Source,
    display: &DisplayArgs,
    filter: &FilterArgs,
    focus: Option<&str>,
) -> Result<()> {
    let filter = filter.to_filter()?;
    let dataset = filter.apply(&load_dataset(source)?);
    let display = display.apply(settings.display.clone());
    warn_out_of_range(&display);
    let (radius_mode, size_metric) = (display.radius_mode, display.size_metric);
    tracing::debug!(
        "scene: radius={}, size={}, entries={}",
        radius_mode,
        size_metric,
        dataset.entries.len()
    );

    let scene = build_scene(&dataset, &display, &settings.layout.tables(), focus);
    print_json(&scene)
}

fn cmd_positions(settings: &Settings, source: &Source, mode: Option<RadiusMode>) -> Result<()> {
    let dataset = load_dataset(source)?;
    let tables = settings.layout.tables();
    let mode = mode.unwrap_or(settings.display.radius_mode);
    let positions = compute_positions(&dataset.entries, mode, &tables.sectors, tables.r_max);
    print_json(&positions)
}

fn cmd_degrees(source: &Source) -> Result<()> {
    let dataset = load_dataset(source)?;
    print_json(&compute_weighted_degrees(
        &dataset.entries,
        &dataset.associations,
    ))
}

fn cmd_rings(settings: &Settings) -> Result<()> {
    print_json(&ring_guides(settings.layout.r_max))
}

fn cmd_validate(path: &Path) -> Result<()> {
    let dataset = read_dataset(path)?;
    warn_dangling(&dataset);
    println!(
        "valid: {} entries, {} associations",
        dataset.entries.len(),
        dataset.associations.len()
    );
    Ok(())
}

fn cmd_report(source: &Source, top: usize) -> Result<()> {
    let dataset = load_dataset(source)?;
    print!("{}", build_report(&dataset, top));
    Ok(())
}

fn cmd_sample(random: Option<usize>, seed: u64) -> Result<()> {
    let dataset = match random {
        Some(n) => synthetic_dataset(n, &mut SmallRng::seed_from_u64(seed)),
        None => sample_dataset().context("built-in sample is malformed")?,
    };
    println!("{}", export_json(&dataset).context("failed to serialize dataset")?);
    Ok(())
}
