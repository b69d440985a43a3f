//! Object graph populator.

use crate::builder::PopulatorBuilder;
use crate::config::PopulationConfig;
use crate::context::RandomizationContext;
use crate::error::PopulateError;
use crate::exclusion::Exclusions;
use crate::registry::{RandomizerRegistry, Resolution};
use populate_core::{Record, TypeDef, TypeDescriptor, TypeRef, TypeSchema, Value};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds randomly populated instances of schema types.
///
/// A populator is immutable once built and can be shared across threads.
/// Every top-level call owns a fresh [`RandomizationContext`], so calls with
/// the same seed and configuration produce identical trees.
pub struct Populator {
    schema: Arc<TypeSchema>,
    registry: RandomizerRegistry,
    exclusions: Exclusions,
    config: PopulationConfig,
}

impl std::fmt::Debug for Populator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Populator")
            .field("exclusions", &self.exclusions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Populator {
    /// Create a populator from a schema and configuration.
    pub fn new(schema: TypeSchema, config: PopulationConfig) -> Result<Self, PopulateError> {
        PopulatorBuilder::new(schema).config(config).build()
    }

    /// Start building a populator for the given schema.
    pub fn builder(schema: TypeSchema) -> PopulatorBuilder {
        PopulatorBuilder::new(schema)
    }

    pub(crate) fn from_parts(
        schema: Arc<TypeSchema>,
        registry: RandomizerRegistry,
        exclusions: Exclusions,
        config: PopulationConfig,
    ) -> Self {
        Self {
            schema,
            registry,
            exclusions,
            config,
        }
    }

    /// The schema this populator builds from.
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// The configuration this populator was built with.
    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// The randomizer registry.
    pub fn registry(&self) -> &RandomizerRegistry {
        &self.registry
    }

    /// Create a context for one top-level call.
    pub fn new_context(&self) -> RandomizationContext {
        RandomizationContext::new(self.config.seed, self.config.collection_size_range)
    }

    /// Populate an instance of the named schema type.
    pub fn populate(&self, type_name: &str) -> Result<Value, PopulateError> {
        self.populate_type(&TypeRef::named(type_name))
    }

    /// Populate a value of any type.
    pub fn populate_type(&self, type_ref: &TypeRef) -> Result<Value, PopulateError> {
        let mut ctx = self.new_context();
        self.populate_descriptor(&TypeDescriptor::of(type_ref.clone()), &mut ctx)
    }

    /// Populate `count` instances of the named schema type.
    ///
    /// The instances share one context, so the batch as a whole is
    /// reproducible from the seed.
    pub fn populate_many(&self, type_name: &str, count: usize) -> Result<Vec<Value>, PopulateError> {
        let descriptor = TypeDescriptor::named(type_name);
        let mut ctx = self.new_context();
        (0..count)
            .map(|_| self.populate_descriptor(&descriptor, &mut ctx))
            .collect()
    }

    /// Populate the named schema type and convert it into a Rust type.
    ///
    /// The tree goes through its JSON form, so `T` must deserialize from the
    /// shape the schema describes.
    pub fn populate_as<T: DeserializeOwned>(&self, type_name: &str) -> Result<T, PopulateError> {
        let value = self.populate(type_name)?;
        serde_json::from_value(value.to_json())
            .map_err(|e| PopulateError::construction(type_name, e.to_string()))
    }

    /// Populate `descriptor` within an existing context.
    pub fn populate_descriptor(
        &self,
        descriptor: &TypeDescriptor,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        if let TypeRef::Named(name) = &descriptor.type_ref {
            if self.is_blocked(name, ctx) {
                trace!("Stopping at {} (depth {})", descriptor, ctx.depth());
                return Ok(Value::Null);
            }
        }

        match self.registry.resolve(descriptor)? {
            Resolution::Randomizer(randomizer) => Ok(randomizer.generate(ctx.rng())),
            Resolution::Container => self.populate_container(descriptor, ctx),
            Resolution::Optional { inner, percent } => {
                if percent.admits(ctx.rng()) {
                    self.populate_descriptor(&descriptor.with_type(inner.clone()), ctx)
                } else {
                    Ok(Value::Null)
                }
            }
            Resolution::Composite(def) => self.populate_composite(def, ctx),
        }
    }

    /// Whether a named type must not be expanded at the current position.
    ///
    /// Enums are leaves and never blocked. Interfaces are checked as the
    /// type they are bound to.
    pub(crate) fn is_blocked(&self, type_name: &str, ctx: &RandomizationContext) -> bool {
        if self.registry.is_enum(type_name) {
            return false;
        }
        ctx.is_active(self.registry.concrete_name(type_name))
            || ctx.depth() >= self.config.max_depth
    }

    fn populate_composite(
        &self,
        def: &TypeDef,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        if !def.constructible {
            return Err(PopulateError::construction(
                &def.name,
                "type has no construction path",
            ));
        }

        // A binding can lead back to a type that is already being populated
        if !ctx.enter(&def.name) {
            trace!("Cycle detected at {}", def.name);
            return Ok(Value::Null);
        }

        debug!("Populating {} (depth {})", def.name, ctx.depth());
        let result = self.populate_fields(def, ctx);
        ctx.exit(&def.name);

        result.map(Value::Object)
    }

    fn populate_fields(
        &self,
        def: &TypeDef,
        ctx: &mut RandomizationContext,
    ) -> Result<Record, PopulateError> {
        let mut record = Record::new(&def.name);

        for field in &def.fields {
            let descriptor = TypeDescriptor::field(&def.name, &field.name, field.field_type.clone());
            let value = if !field.is_populated() || self.exclusions.excludes(&descriptor) {
                trace!("Skipping {}", descriptor);
                Value::default_for(&field.field_type)
            } else {
                self.populate_descriptor(&descriptor, ctx)?
            };
            record.set_field(&field.name, value);
        }

        Ok(record)
    }
}

/// Populate an instance of `type_name` with a one-off populator.
pub fn populate(
    schema: &TypeSchema,
    type_name: &str,
    config: &PopulationConfig,
) -> Result<Value, PopulateError> {
    Populator::new(schema.clone(), config.clone())?.populate(type_name)
}
