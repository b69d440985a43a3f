//! graph-populate library
//!
//! Populates object graphs with random fixture data. Types are described by a
//! YAML [`TypeSchema`]; the [`Populator`] walks a type, generates every field
//! with a seeded random source, and returns a [`Value`] tree that can be
//! written as JSON or YAML or deserialized into a Rust type.
//!
//! # Crates
//!
//! - `populate_core` - type schema, type descriptors and the value tree
//! - `populate_randomizers` - scalar randomizers and the `Randomizer` trait
//! - `populate_engine` - registry, context, collection and object graph
//!   population
//!
//! # CLI Usage
//!
//! ```bash
//! # Populate three Person instances as JSON
//! graph-populate populate --schema schema.yaml --type Person --count 3 --seed 42
//!
//! # Validate a schema and configuration without generating anything
//! graph-populate check --schema schema.yaml --config populate.yaml
//! ```

use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub mod commands;

// Re-export the engine crates for convenience
pub use populate_core::{
    FieldDef, Record, TypeDef, TypeDescriptor, TypeKind, TypeRef, TypeSchema, Value,
};
pub use populate_engine::{
    populate, PopulateError, PopulationConfig, Populator, PopulatorBuilder, RandomizationContext,
};
pub use populate_randomizers::{Charset, Randomizer, SharedRandomizer};

/// Output format for populated instances.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Options of the `populate` command.
#[derive(Args, Clone, Debug)]
pub struct PopulateOpts {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "GRAPH_POPULATE_SCHEMA")]
    pub schema: PathBuf,

    /// Path to population config YAML file
    #[arg(long, short = 'c', env = "GRAPH_POPULATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the schema type to populate
    #[arg(long = "type", short = 't')]
    pub type_name: String,

    /// Number of instances to generate
    #[arg(long, default_value = "1")]
    pub count: usize,

    /// Random seed for deterministic generation (overrides the config file)
    #[arg(long, env = "GRAPH_POPULATE_SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Options of the `check` command.
#[derive(Args, Clone, Debug)]
pub struct CheckOpts {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "GRAPH_POPULATE_SCHEMA")]
    pub schema: PathBuf,

    /// Path to population config YAML file
    #[arg(long, short = 'c', env = "GRAPH_POPULATE_CONFIG")]
    pub config: Option<PathBuf>,
}
