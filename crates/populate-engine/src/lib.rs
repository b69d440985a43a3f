//! Recursive object graph population.
//!
//! The engine walks a type from a [`TypeSchema`], asks the
//! [`RandomizerRegistry`] how each part is produced, and assembles a fully
//! populated [`Value`] tree. Cycles in the type graph are cut by the active
//! path kept in the [`RandomizationContext`]; containers are filled by the
//! collection populator; optional values follow the configured presence
//! probability.
//!
//! # Example
//!
//! ```ignore
//! use populate_core::TypeSchema;
//! use populate_engine::Populator;
//!
//! let schema = TypeSchema::from_file("schema.yaml")?;
//! let populator = Populator::builder(schema)
//!     .seed(42)
//!     .collection_size_range(2, 4)
//!     .build()?;
//!
//! let person = populator.populate("Person")?;
//! println!("{}", person.to_json());
//! ```

pub mod builder;
pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod exclusion;
pub mod populator;
pub mod registry;

// Re-exports for convenience
pub use builder::PopulatorBuilder;
pub use config::{
    DateRange, ExclusionRule, FieldOverride, PopulationConfig, SizeRange, TimeRange, TypeOverride,
};
pub use context::RandomizationContext;
pub use error::PopulateError;
pub use exclusion::{ExclusionPredicate, Exclusions};
pub use populator::{populate, Populator};
pub use registry::{RandomizerRegistry, Resolution};

pub use populate_core::{TypeDescriptor, TypeRef, TypeSchema, Value};
