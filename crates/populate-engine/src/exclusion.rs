//! Field exclusion.

use crate::config::ExclusionRule;
use populate_core::TypeDescriptor;
use std::sync::Arc;

/// Programmatic exclusion predicate over field descriptors.
pub type ExclusionPredicate = Arc<dyn Fn(&TypeDescriptor) -> bool + Send + Sync>;

/// Declarative rules and programmatic predicates deciding which fields are
/// left at their default value.
#[derive(Clone, Default)]
pub struct Exclusions {
    rules: Vec<ExclusionRule>,
    predicates: Vec<ExclusionPredicate>,
}

impl Exclusions {
    /// Create exclusions from rules and predicates.
    pub fn new(rules: Vec<ExclusionRule>, predicates: Vec<ExclusionPredicate>) -> Self {
        Self { rules, predicates }
    }

    /// Whether the field described by `descriptor` is excluded.
    pub fn excludes(&self, descriptor: &TypeDescriptor) -> bool {
        self.rules.iter().any(|rule| rule.matches(descriptor))
            || self.predicates.iter().any(|predicate| predicate(descriptor))
    }

    /// Number of rules and predicates.
    pub fn len(&self) -> usize {
        self.rules.len() + self.predicates.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Exclusions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exclusions")
            .field("rules", &self.rules)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use populate_core::TypeRef;

    #[test]
    fn test_rules_and_predicates() {
        let exclusions = Exclusions::new(
            vec![ExclusionRule::of_field("Person", "password")],
            vec![Arc::new(|d: &TypeDescriptor| {
                d.field_name.as_deref().is_some_and(|name| name.starts_with('_'))
            })],
        );

        assert_eq!(exclusions.len(), 2);
        assert!(exclusions.excludes(&TypeDescriptor::field(
            "Person",
            "password",
            TypeRef::String
        )));
        assert!(exclusions.excludes(&TypeDescriptor::field(
            "Order",
            "_internal",
            TypeRef::Int32
        )));
        assert!(!exclusions.excludes(&TypeDescriptor::field(
            "Person",
            "name",
            TypeRef::String
        )));
    }

    #[test]
    fn test_empty() {
        let exclusions = Exclusions::default();
        assert!(exclusions.is_empty());
        assert!(!exclusions.excludes(&TypeDescriptor::of(TypeRef::String)));
    }
}
