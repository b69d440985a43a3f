//! Programmatic construction of a [`Populator`].

use crate::config::{ExclusionRule, PopulationConfig, SizeRange};
use crate::error::PopulateError;
use crate::exclusion::{ExclusionPredicate, Exclusions};
use crate::populator::Populator;
use crate::registry::{Overrides, RandomizerRegistry};
use chrono::{NaiveDate, NaiveTime};
use populate_core::{TypeDescriptor, TypeRef, TypeSchema};
use populate_randomizers::{Charset, Randomizer, SharedRandomizer};
use std::sync::Arc;
use tracing::debug;

/// Builder for [`Populator`].
///
/// Starts from a [`PopulationConfig`] (the default one unless
/// [`config`](Self::config) is called) and layers programmatic settings on
/// top. Programmatic randomizers take priority over declarative overrides
/// for the same type or field.
///
/// ```ignore
/// let populator = Populator::builder(schema)
///     .seed(42)
///     .collection_size_range(2, 4)
///     .randomize_field("Person", "age", |rng: &mut dyn RngCore| {
///         Value::Int32(rng.gen_range(18..=80))
///     })
///     .exclude_field("Person", "password")
///     .build()?;
/// ```
pub struct PopulatorBuilder {
    schema: TypeSchema,
    config: PopulationConfig,
    overrides: Overrides,
    predicates: Vec<ExclusionPredicate>,
}

impl PopulatorBuilder {
    /// Create a builder for the given schema.
    pub fn new(schema: TypeSchema) -> Self {
        Self {
            schema,
            config: PopulationConfig::default(),
            overrides: Overrides::default(),
            predicates: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    ///
    /// Programmatic overrides and predicates added so far are kept.
    pub fn config(mut self, config: PopulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the random source for reproducible output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Inclusive size range for containers.
    pub fn collection_size_range(mut self, min: usize, max: usize) -> Self {
        self.config.collection_size_range = SizeRange::new(min, max);
        self
    }

    /// Maximum nesting depth of named types.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Global presence probability for optional values (clamped to 0-100).
    pub fn optional_percent(mut self, percent: i32) -> Self {
        self.config.optional_percent = percent;
        self
    }

    /// Character set for generated chars and strings.
    pub fn charset(mut self, charset: Charset) -> Self {
        self.config.charset = charset;
        self
    }

    /// Inclusive length range for generated strings.
    pub fn string_length_range(mut self, min: usize, max: usize) -> Self {
        self.config.string_length_range = SizeRange::new(min, max);
        self
    }

    /// Bounds for generated dates and timestamps.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.config.date_range.start = start;
        self.config.date_range.end = end;
        self
    }

    /// Bounds for generated times of day.
    pub fn time_range(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.config.time_range.start = start;
        self.config.time_range.end = end;
        self
    }

    /// Bind an interface to the concrete type that populates it.
    pub fn bind(mut self, interface: impl Into<String>, concrete: impl Into<String>) -> Self {
        self.config.bindings.insert(interface.into(), concrete.into());
        self
    }

    /// Leave every field of the given type at its default value.
    pub fn exclude_type(mut self, type_ref: TypeRef) -> Self {
        self.config.exclusions.push(ExclusionRule::of_type(type_ref));
        self
    }

    /// Leave one field at its default value.
    pub fn exclude_field(
        mut self,
        declaring_type: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.config
            .exclusions
            .push(ExclusionRule::of_field(declaring_type, field));
        self
    }

    /// Leave every field matching the predicate at its default value.
    pub fn exclude_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Use `randomizer` for every value of the given type.
    pub fn randomize_type<R>(mut self, type_ref: TypeRef, randomizer: R) -> Self
    where
        R: Randomizer + 'static,
    {
        let randomizer: SharedRandomizer = Arc::new(randomizer);
        self.overrides.types.push((type_ref, randomizer));
        self
    }

    /// Use `randomizer` for one field.
    pub fn randomize_field<R>(
        mut self,
        declaring_type: impl Into<String>,
        field: impl Into<String>,
        randomizer: R,
    ) -> Self
    where
        R: Randomizer + 'static,
    {
        let randomizer: SharedRandomizer = Arc::new(randomizer);
        self.overrides
            .fields
            .push(((declaring_type.into(), field.into()), randomizer));
        self
    }

    /// Validate the configuration and build the populator.
    pub fn build(self) -> Result<Populator, PopulateError> {
        self.config.validate()?;

        let schema = Arc::new(self.schema);
        let registry = RandomizerRegistry::new(Arc::clone(&schema), &self.config, self.overrides)?;
        let exclusions = Exclusions::new(self.config.exclusions.clone(), self.predicates);

        debug!(
            "Built populator: {} types, {} exclusions, seed {:?}",
            schema.types.len(),
            exclusions.len(),
            self.config.seed
        );

        Ok(Populator::from_parts(
            schema,
            registry,
            exclusions,
            self.config,
        ))
    }
}
