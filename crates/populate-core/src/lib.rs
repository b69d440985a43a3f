//! Core types for the graph-populate framework.
//!
//! This crate provides the foundational types shared by the randomizers and
//! the population engine:
//!
//! - [`TypeRef`] - Type universe understood by the populator
//! - [`TypeDescriptor`] - A type plus the field context it is populated in
//! - [`TypeSchema`] - Cached per-type structure definitions loaded from YAML
//! - [`Value`] - The populated value tree
//! - [`RandomizerConfig`] - Declarative randomizer definitions
//!
//! # Architecture
//!
//! ```text
//! populate-core (this crate)
//!    │
//!    ├─── populate-randomizers  (scalar randomizers producing Values)
//!    │
//!    └─── populate-engine       (registry, context, object graph populator)
//! ```
//!
//! # Example
//!
//! ```rust
//! use populate_core::{TypeRef, TypeSchema};
//!
//! let schema = TypeSchema::from_yaml(r#"
//! types:
//!   - name: Person
//!     kind: struct
//!     fields:
//!       - name: name
//!         type: string
//!       - name: tags
//!         type:
//!           type: list
//!           element: string
//! "#).unwrap();
//!
//! let person = schema.get_type("Person").unwrap();
//! assert_eq!(person.fields[1].field_type, TypeRef::list(TypeRef::String));
//! ```

pub mod json;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{FieldDef, RandomizerConfig, SchemaError, TypeDef, TypeKind, TypeSchema};
pub use types::{TypeDescriptor, TypeRef};
pub use values::{Record, Value};
