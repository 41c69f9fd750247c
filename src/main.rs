use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use log::info;

use kubepack::binding::{binding_plan, BindingAction};
use kubepack::catalog::csv_catalog::read_catalog_from_csv_file;
use kubepack::catalog::pricing_file::read_catalog_from_pricing_file;
use kubepack::catalog::Catalog;
use kubepack::config::PlannerConfig;
use kubepack::optimizer::optimizer::PlacementOptimizer;
use kubepack::report::printer::print_report;
use kubepack::report::summary::summarize;
use kubepack::snapshot::cluster::ClusterSnapshot;

const LOG_FILE_SIZE_LIMIT_BYTES: usize = 10 * 1024 * 1024;
const LOG_FILES_KEPT: usize = 5;

#[derive(Parser)]
struct Args {
    #[clap(short, long)]
    config_file: PathBuf,
    /// Pricing file (json) or plain catalog table (csv).
    #[clap(long)]
    catalog_file: PathBuf,
    #[clap(short, long)]
    snapshot_file: PathBuf,
    /// Overrides `strategy_type` from the config.
    #[clap(long)]
    strategy: Option<String>,
}

fn init_logging(logs_filepath: &Option<String>) {
    // log level INFO by default
    let mut env_logger_builder = env_logger::builder();
    if env::var("RUST_LOG").is_err() {
        env_logger_builder.filter_level(log::LevelFilter::Info);
    }
    if let Some(path) = logs_filepath {
        let log_file = FileRotate::new(
            path,
            AppendCount::new(LOG_FILES_KEPT),
            ContentLimit::Bytes(LOG_FILE_SIZE_LIMIT_BYTES),
            Compression::None,
            #[cfg(unix)]
            None,
        );
        env_logger_builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    env_logger_builder.init();
}

fn load_catalog(path: &Path, config: &PlannerConfig) -> anyhow::Result<Catalog> {
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_catalog_from_csv_file(path)?,
        _ => read_catalog_from_pricing_file(path, &config.pricing_provider)?,
    };
    Ok(catalog)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_yaml = std::fs::read_to_string(&args.config_file)
        .with_context(|| format!("could not read config file {:?}", args.config_file))?;
    let mut config = PlannerConfig::from_yaml(&config_yaml)?;
    if let Some(strategy) = args.strategy {
        config.strategy_type = strategy;
    }

    init_logging(&config.logs_filepath);

    info!("Path to config file: {:?}", args.config_file);
    info!("Path to catalog file: {:?}", args.catalog_file);
    info!("Path to snapshot file: {:?}", args.snapshot_file);

    let catalog = load_catalog(&args.catalog_file, &config)
        .with_context(|| format!("could not load catalog {:?}", args.catalog_file))?;
    info!("Catalog has {} node types", catalog.len());

    let snapshot = ClusterSnapshot::from_file(&args.snapshot_file)
        .with_context(|| format!("could not load snapshot {:?}", args.snapshot_file))?;
    let inputs = snapshot.to_placement_inputs(&catalog, &config.excluded_nodes)?;

    let optimizer = PlacementOptimizer::from_config(&config)?;
    info!(
        "Planner {:?} runs strategy {}",
        config.planner_name,
        optimizer.strategy().name()
    );
    let schedule = optimizer.optimize(&inputs.workloads, inputs.existing_bins, &catalog)?;

    let report = summarize(&schedule)?;
    print_report(&report, &config.report_printer.clone().unwrap_or_default())?;

    for action in binding_plan(&schedule) {
        match action {
            BindingAction::Provision { bin, node_type } => {
                info!("Provision node {:?} of type {:?}", bin, node_type)
            }
            BindingAction::Bind { workload, bin } => {
                info!("Bind pod {:?} to node {:?}", workload, bin)
            }
        }
    }
    Ok(())
}
