//! Randomizer registry.
//!
//! The registry decides, for every type descriptor the populator meets, how
//! its value is produced. Lookup order:
//!
//! 1. field override for `(declaring_type, field_name)`
//! 2. type override for the exact type
//! 3. default randomizer (scalars, and enums from their variant list)
//! 4. structure: containers, optionals, composites, and interfaces through
//!    the explicit binding table
//!
//! Anything else is unresolvable. The registry is filled once when the
//! populator is built and never changes afterwards.

use crate::config::PopulationConfig;
use crate::error::PopulateError;
use populate_core::{TypeDef, TypeDescriptor, TypeKind, TypeRef, TypeSchema, Value};
use populate_randomizers::static_value::OneOfRandomizer;
use populate_randomizers::{
    default_randomizer, from_config, OptionalPercent, RandomizerSettings, SharedRandomizer,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// How a type descriptor is populated.
#[derive(Clone)]
pub enum Resolution<'a> {
    /// Invoke a randomizer
    Randomizer(SharedRandomizer),

    /// Populate an array, list, set or map
    Container,

    /// Decide presence, then populate the inner type
    Optional {
        /// The wrapped type
        inner: &'a TypeRef,
        /// Presence probability for this value
        percent: OptionalPercent,
    },

    /// Populate a composite type field by field
    Composite(&'a TypeDef),
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Randomizer(_) => f.write_str("Randomizer"),
            Resolution::Container => f.write_str("Container"),
            Resolution::Optional { inner, percent } => f
                .debug_struct("Optional")
                .field("inner", inner)
                .field("percent", percent)
                .finish(),
            Resolution::Composite(def) => f.debug_tuple("Composite").field(&def.name).finish(),
        }
    }
}

/// Programmatic overrides handed to the registry by the builder.
#[derive(Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) fields: Vec<((String, String), SharedRandomizer)>,
    pub(crate) types: Vec<(TypeRef, SharedRandomizer)>,
}

/// Lookup table from type descriptors to randomizers and structural
/// strategies.
pub struct RandomizerRegistry {
    schema: Arc<TypeSchema>,
    field_overrides: HashMap<(String, String), SharedRandomizer>,
    type_overrides: HashMap<TypeRef, SharedRandomizer>,
    defaults: HashMap<TypeRef, SharedRandomizer>,
    enums: HashMap<String, SharedRandomizer>,
    bindings: BTreeMap<String, String>,
    settings: RandomizerSettings,
    optional_percent: OptionalPercent,
}

impl RandomizerRegistry {
    /// Build the registry for a schema and configuration.
    pub(crate) fn new(
        schema: Arc<TypeSchema>,
        config: &PopulationConfig,
        overrides: Overrides,
    ) -> Result<Self, PopulateError> {
        let settings = config.randomizer_settings();
        validate_bindings(&schema, &config.bindings)?;

        // Declarative overrides first so programmatic ones replace them
        let mut field_overrides = HashMap::new();
        for o in &config.field_overrides {
            let target = schema.get_field_type(&o.declaring_type, &o.field)?;
            field_overrides.insert(
                (o.declaring_type.clone(), o.field.clone()),
                from_config(&o.randomizer, target, &settings),
            );
        }
        for ((owner, field), randomizer) in overrides.fields {
            schema.get_field_type(&owner, &field)?;
            field_overrides.insert((owner, field), randomizer);
        }

        let mut type_overrides = HashMap::new();
        for o in &config.type_overrides {
            type_overrides.insert(
                o.type_ref.clone(),
                from_config(&o.randomizer, &o.type_ref, &settings),
            );
        }
        type_overrides.extend(overrides.types);

        let mut defaults = HashMap::new();
        for def in &schema.types {
            for field in &def.fields {
                collect_defaults(&field.field_type, &settings, &mut defaults);
            }
        }

        let enums = schema
            .types
            .iter()
            .filter(|def| def.kind == TypeKind::Enum && !def.variants.is_empty())
            .map(|def| {
                let variants = def.variants.iter().cloned().map(Value::String).collect();
                let randomizer: SharedRandomizer = Arc::new(OneOfRandomizer::new(variants));
                (def.name.clone(), randomizer)
            })
            .collect();

        debug!(
            "Built randomizer registry: {} field overrides, {} type overrides, {} defaults",
            field_overrides.len(),
            type_overrides.len(),
            defaults.len()
        );

        Ok(Self {
            schema,
            field_overrides,
            type_overrides,
            defaults,
            enums,
            bindings: config.bindings.clone(),
            settings,
            optional_percent: OptionalPercent::new(config.optional_percent),
        })
    }

    /// Resolve how to populate `descriptor`.
    pub fn resolve<'a>(
        &'a self,
        descriptor: &'a TypeDescriptor,
    ) -> Result<Resolution<'a>, PopulateError> {
        if let Some((owner, field)) = descriptor.field_key() {
            if let Some(randomizer) = self
                .field_overrides
                .get(&(owner.to_string(), field.to_string()))
            {
                return Ok(Resolution::Randomizer(randomizer.clone()));
            }
        }

        if let Some(randomizer) = self.type_overrides.get(&descriptor.type_ref) {
            return Ok(Resolution::Randomizer(randomizer.clone()));
        }

        match &descriptor.type_ref {
            TypeRef::Array { .. }
            | TypeRef::List { .. }
            | TypeRef::Set { .. }
            | TypeRef::Map { .. } => Ok(Resolution::Container),
            TypeRef::Optional { inner } => Ok(Resolution::Optional {
                inner: inner.as_ref(),
                percent: self.optional_percent_for(descriptor),
            }),
            TypeRef::Named(name) => self.resolve_named(name, descriptor),
            scalar => self
                .defaults
                .get(scalar)
                .cloned()
                .or_else(|| default_randomizer(scalar, &self.settings))
                .map(Resolution::Randomizer)
                .ok_or_else(|| PopulateError::unresolvable(descriptor)),
        }
    }

    fn resolve_named<'a>(
        &'a self,
        name: &str,
        descriptor: &TypeDescriptor,
    ) -> Result<Resolution<'a>, PopulateError> {
        let def = self
            .schema
            .get_type(name)
            .ok_or_else(|| PopulateError::unresolvable(descriptor))?;

        match def.kind {
            TypeKind::Struct => Ok(Resolution::Composite(def)),
            TypeKind::Enum => self
                .enums
                .get(&def.name)
                .cloned()
                .map(Resolution::Randomizer)
                .ok_or_else(|| PopulateError::unresolvable(descriptor)),
            TypeKind::Interface => {
                let bound = self
                    .bindings
                    .get(&def.name)
                    .ok_or_else(|| PopulateError::unresolvable(descriptor))?;
                debug!("Following binding {} -> {}", def.name, bound);

                if let Some(randomizer) = self.type_overrides.get(&TypeRef::Named(bound.clone())) {
                    return Ok(Resolution::Randomizer(randomizer.clone()));
                }
                // Bindings are validated to point at a non-interface type
                self.resolve_named(bound, descriptor)
            }
        }
    }

    /// Presence probability for an optional value.
    ///
    /// A field's own percentage takes priority over the global one.
    pub fn optional_percent_for(&self, descriptor: &TypeDescriptor) -> OptionalPercent {
        descriptor
            .field_key()
            .and_then(|(owner, field)| self.schema.get_type(owner)?.get_field(field))
            .and_then(|field| field.optional_percent)
            .map(OptionalPercent::new)
            .unwrap_or(self.optional_percent)
    }

    /// Name of the type `name` is populated as.
    ///
    /// An interface with a binding maps to its bound type; every other name
    /// maps to itself.
    pub fn concrete_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.bindings.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Whether `name` is an enum of the schema.
    pub fn is_enum(&self, name: &str) -> bool {
        self.schema
            .get_type(name)
            .is_some_and(|def| def.kind == TypeKind::Enum)
    }

    /// Interfaces of the schema that have no binding.
    pub fn unbound_interfaces(&self) -> Vec<&str> {
        self.schema
            .types
            .iter()
            .filter(|def| def.kind == TypeKind::Interface && !self.bindings.contains_key(&def.name))
            .map(|def| def.name.as_str())
            .collect()
    }

    /// The schema the registry resolves against.
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }
}

fn validate_bindings(
    schema: &TypeSchema,
    bindings: &BTreeMap<String, String>,
) -> Result<(), PopulateError> {
    for (interface, concrete) in bindings {
        let def = schema
            .get_type(interface)
            .ok_or_else(|| PopulateError::Config(format!("binding for unknown type '{interface}'")))?;
        if def.kind != TypeKind::Interface {
            return Err(PopulateError::Config(format!(
                "binding source '{interface}' is not an interface"
            )));
        }

        let target = schema.get_type(concrete).ok_or_else(|| {
            PopulateError::Config(format!(
                "interface '{interface}' is bound to unknown type '{concrete}'"
            ))
        })?;
        if target.kind == TypeKind::Interface {
            return Err(PopulateError::Config(format!(
                "interface '{interface}' is bound to interface '{concrete}'"
            )));
        }
    }
    Ok(())
}

fn collect_defaults(
    type_ref: &TypeRef,
    settings: &RandomizerSettings,
    defaults: &mut HashMap<TypeRef, SharedRandomizer>,
) {
    match type_ref {
        TypeRef::Array { element } | TypeRef::List { element } | TypeRef::Set { element } => {
            collect_defaults(element, settings, defaults)
        }
        TypeRef::Map { key, value } => {
            collect_defaults(key, settings, defaults);
            collect_defaults(value, settings, defaults);
        }
        TypeRef::Optional { inner } => collect_defaults(inner, settings, defaults),
        TypeRef::Named(_) => {}
        scalar => {
            if !defaults.contains_key(scalar) {
                if let Some(randomizer) = default_randomizer(scalar, settings) {
                    defaults.insert(scalar.clone(), randomizer);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use populate_core::FieldDef;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn test_schema() -> Arc<TypeSchema> {
        Arc::new(
            TypeSchema::new(vec![
                TypeDef::composite(
                    "Person",
                    vec![
                        FieldDef::new("name", TypeRef::String),
                        FieldDef::new("nickname", TypeRef::optional(TypeRef::String))
                            .with_optional_percent(25),
                        FieldDef::new("tags", TypeRef::list(TypeRef::String)),
                        FieldDef::new("pet", TypeRef::named("Animal")),
                        FieldDef::new("color", TypeRef::named("Color")),
                    ],
                ),
                TypeDef::interface("Animal"),
                TypeDef::composite("Dog", vec![FieldDef::new("name", TypeRef::String)]),
                TypeDef::enumeration("Color", vec!["Red".into(), "Green".into()]),
            ])
            .unwrap(),
        )
    }

    fn registry(config: &PopulationConfig, overrides: Overrides) -> RandomizerRegistry {
        RandomizerRegistry::new(test_schema(), config, overrides).unwrap()
    }

    #[test]
    fn test_scalar_default() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());
        let descriptor = TypeDescriptor::of(TypeRef::String);

        assert!(matches!(
            registry.resolve(&descriptor).unwrap(),
            Resolution::Randomizer(_)
        ));
    }

    #[test]
    fn test_scalar_not_in_schema_still_resolves() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());
        let descriptor = TypeDescriptor::of(TypeRef::decimal(5, 1));

        assert!(matches!(
            registry.resolve(&descriptor).unwrap(),
            Resolution::Randomizer(_)
        ));
    }

    #[test]
    fn test_structural_resolutions() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());

        let tags = TypeDescriptor::field("Person", "tags", TypeRef::list(TypeRef::String));
        assert!(matches!(registry.resolve(&tags).unwrap(), Resolution::Container));

        let person = TypeDescriptor::named("Person");
        match registry.resolve(&person).unwrap() {
            Resolution::Composite(def) => assert_eq!(def.name, "Person"),
            other => panic!("Expected Composite, got {other:?}"),
        }
    }

    #[test]
    fn test_field_optional_percent_overrides_global() {
        let config = PopulationConfig {
            optional_percent: 90,
            ..PopulationConfig::default()
        };
        let registry = registry(&config, Overrides::default());

        let nickname =
            TypeDescriptor::field("Person", "nickname", TypeRef::optional(TypeRef::String));
        match registry.resolve(&nickname).unwrap() {
            Resolution::Optional { inner, percent } => {
                assert_eq!(*inner, TypeRef::String);
                assert_eq!(percent.get(), 25);
            }
            other => panic!("Expected Optional, got {other:?}"),
        }

        let nested = TypeDescriptor::of(TypeRef::optional(TypeRef::String));
        assert_eq!(registry.optional_percent_for(&nested).get(), 90);
    }

    #[test]
    fn test_override_priority() {
        let constant = |s: &'static str| -> SharedRandomizer {
            Arc::new(move |_: &mut dyn RngCore| Value::String(s.to_string()))
        };
        let overrides = Overrides {
            fields: vec![(("Person".into(), "name".into()), constant("field"))],
            types: vec![(TypeRef::String, constant("type"))],
        };
        let registry = registry(&PopulationConfig::default(), overrides);
        let mut rng = StdRng::seed_from_u64(42);

        let name = TypeDescriptor::field("Person", "name", TypeRef::String);
        let other = TypeDescriptor::field("Dog", "name", TypeRef::String);

        let generate = |descriptor: &TypeDescriptor, rng: &mut StdRng| match registry
            .resolve(descriptor)
            .unwrap()
        {
            Resolution::Randomizer(r) => r.generate(rng),
            other => panic!("Expected Randomizer, got {other:?}"),
        };

        assert_eq!(generate(&name, &mut rng), Value::String("field".into()));
        assert_eq!(generate(&other, &mut rng), Value::String("type".into()));
    }

    #[test]
    fn test_programmatic_field_override_beats_declarative() {
        let config: PopulationConfig = serde_yaml::from_str(
            r#"
field_overrides:
  - declaring_type: Person
    field: name
    randomizer:
      type: static
      value: declarative
"#,
        )
        .unwrap();
        let programmatic: SharedRandomizer =
            Arc::new(|_: &mut dyn RngCore| Value::String("programmatic".into()));
        let overrides = Overrides {
            fields: vec![(("Person".into(), "name".into()), programmatic)],
            types: Vec::new(),
        };
        let registry = registry(&config, overrides);
        let mut rng = StdRng::seed_from_u64(42);

        let name = TypeDescriptor::field("Person", "name", TypeRef::String);
        match registry.resolve(&name).unwrap() {
            Resolution::Randomizer(r) => {
                assert_eq!(r.generate(&mut rng), Value::String("programmatic".into()))
            }
            other => panic!("Expected Randomizer, got {other:?}"),
        }
    }

    #[test]
    fn test_override_for_unknown_field_fails() {
        let config: PopulationConfig = serde_yaml::from_str(
            r#"
field_overrides:
  - declaring_type: Person
    field: missing
    randomizer:
      type: uuid_v4
"#,
        )
        .unwrap();

        let result = RandomizerRegistry::new(test_schema(), &config, Overrides::default());
        assert!(matches!(result, Err(PopulateError::Schema(_))));
    }

    #[test]
    fn test_enum_resolves_to_variant() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());
        let mut rng = StdRng::seed_from_u64(42);
        let color = TypeDescriptor::named("Color");

        match registry.resolve(&color).unwrap() {
            Resolution::Randomizer(r) => {
                let value = r.generate(&mut rng);
                assert!(value.as_str() == Some("Red") || value.as_str() == Some("Green"));
            }
            other => panic!("Expected Randomizer, got {other:?}"),
        }
    }

    #[test]
    fn test_unbound_interface_is_unresolvable() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());
        let pet = TypeDescriptor::field("Person", "pet", TypeRef::named("Animal"));

        match registry.resolve(&pet) {
            Err(PopulateError::UnresolvableType { descriptor }) => assert_eq!(descriptor, pet),
            other => panic!("Expected UnresolvableType, got {other:?}"),
        }
        assert_eq!(registry.unbound_interfaces(), vec!["Animal"]);
    }

    #[test]
    fn test_bound_interface_resolves_to_concrete() {
        let mut config = PopulationConfig::default();
        config.bindings.insert("Animal".into(), "Dog".into());
        let registry = registry(&config, Overrides::default());
        let pet = TypeDescriptor::field("Person", "pet", TypeRef::named("Animal"));

        match registry.resolve(&pet).unwrap() {
            Resolution::Composite(def) => assert_eq!(def.name, "Dog"),
            other => panic!("Expected Composite, got {other:?}"),
        }
        assert!(registry.unbound_interfaces().is_empty());
        assert_eq!(registry.concrete_name("Animal"), "Dog");
        assert_eq!(registry.concrete_name("Person"), "Person");
    }

    #[test]
    fn test_is_enum() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());

        assert!(registry.is_enum("Color"));
        assert!(!registry.is_enum("Person"));
        assert!(!registry.is_enum("Ghost"));
    }

    #[test]
    fn test_invalid_bindings_are_rejected() {
        let mut config = PopulationConfig::default();
        config.bindings.insert("Animal".into(), "Cat".into());
        assert!(matches!(
            RandomizerRegistry::new(test_schema(), &config, Overrides::default()),
            Err(PopulateError::Config(_))
        ));

        let mut config = PopulationConfig::default();
        config.bindings.insert("Dog".into(), "Person".into());
        assert!(matches!(
            RandomizerRegistry::new(test_schema(), &config, Overrides::default()),
            Err(PopulateError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_named_type_is_unresolvable() {
        let registry = registry(&PopulationConfig::default(), Overrides::default());
        let ghost = TypeDescriptor::named("Ghost");

        assert!(matches!(
            registry.resolve(&ghost),
            Err(PopulateError::UnresolvableType { .. })
        ));
    }
}
