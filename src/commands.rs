//! Implementation of the CLI commands.

use crate::{CheckOpts, OutputFormat, PopulateOpts};
use anyhow::{bail, Context};
use populate_core::{TypeSchema, Value};
use populate_engine::{PopulationConfig, Populator};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load the population config, or the default one when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PopulationConfig> {
    match path {
        Some(path) => PopulationConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}")),
        None => Ok(PopulationConfig::default()),
    }
}

/// Load schema and config and build a populator.
///
/// A `seed` given here replaces the seed of the config file.
pub fn build_populator(
    schema_path: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
) -> anyhow::Result<Populator> {
    let schema = TypeSchema::from_file(schema_path)
        .with_context(|| format!("Failed to load schema from {schema_path:?}"))?;

    let mut config = load_config(config_path)?;
    if seed.is_some() {
        config.seed = seed;
    }

    Populator::new(schema, config).context("Failed to build populator")
}

/// Render populated values in the given format.
///
/// A single value is rendered on its own, several values as a list.
pub fn render(values: &[Value], format: OutputFormat) -> anyhow::Result<String> {
    let json = match values {
        [single] => single.to_json(),
        many => serde_json::Value::Array(many.iter().map(Value::to_json).collect()),
    };

    let rendered = match format {
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(&json).context("Failed to render JSON")?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yaml::to_string(&json).context("Failed to render YAML")?,
    };
    Ok(rendered)
}

/// Run the `populate` command; returns the number of generated instances.
pub fn run_populate(opts: &PopulateOpts) -> anyhow::Result<usize> {
    let populator = build_populator(&opts.schema, opts.config.as_deref(), opts.seed)?;

    info!(
        "Populating {} instance(s) of {} (seed={:?})",
        opts.count,
        opts.type_name,
        populator.config().seed
    );

    let values = populator
        .populate_many(&opts.type_name, opts.count)
        .with_context(|| format!("Failed to populate {}", opts.type_name))?;
    let rendered = render(&values, opts.format)?;

    match &opts.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {path:?}"))?;
            info!("Wrote {} instance(s) to {:?}", values.len(), path);
        }
        None => print!("{rendered}"),
    }

    Ok(values.len())
}

/// Outcome of the `check` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of types in the schema
    pub type_count: usize,

    /// Interfaces without a binding; populating them fails
    pub unbound_interfaces: Vec<String>,
}

/// Run the `check` command.
///
/// Fails when a field references an unknown type or the config does not fit
/// the schema. Unbound interfaces are reported but are not an error.
pub fn run_check(opts: &CheckOpts) -> anyhow::Result<CheckReport> {
    let populator = build_populator(&opts.schema, opts.config.as_deref(), None)?;
    let schema = populator.schema();

    let unknown = schema.unknown_references();
    if !unknown.is_empty() {
        let details: Vec<String> = unknown
            .iter()
            .map(|(location, name)| format!("{location} -> {name}"))
            .collect();
        bail!("Schema references unknown types: {}", details.join(", "));
    }

    let unbound_interfaces: Vec<String> = populator
        .registry()
        .unbound_interfaces()
        .into_iter()
        .map(str::to_string)
        .collect();
    for interface in &unbound_interfaces {
        warn!("Interface {interface} has no binding");
    }

    info!("Schema OK: {} types", schema.types.len());

    Ok(CheckReport {
        type_count: schema.types.len(),
        unbound_interfaces,
    })
}
