//! Container population: arrays, lists, sets and maps.

use crate::context::RandomizationContext;
use crate::error::PopulateError;
use crate::populator::Populator;
use populate_core::{TypeDescriptor, TypeRef, Value};
use tracing::debug;

/// Attempts allowed per requested set element before giving up.
pub const SET_RETRY_FACTOR: usize = 3;

impl Populator {
    /// Populate the container described by `descriptor`.
    ///
    /// The size is drawn from the context. A container whose element type
    /// cannot be expanded at this depth (it is already being populated, or
    /// the depth ceiling is reached) is returned empty.
    pub(crate) fn populate_container(
        &self,
        descriptor: &TypeDescriptor,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        match &descriptor.type_ref {
            TypeRef::Array { element } | TypeRef::List { element } => {
                if self.element_blocked(element, ctx) {
                    return Ok(Value::Array(Vec::new()));
                }
                let size = ctx.next_container_size();
                debug!("Populating {} with {} elements", descriptor.type_ref, size);

                let element = descriptor.nested(element.as_ref().clone());
                let items = (0..size)
                    .map(|_| self.populate_descriptor(&element, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            TypeRef::Set { element } => {
                if self.element_blocked(element, ctx) {
                    return Ok(Value::Set(Vec::new()));
                }
                let size = ctx.next_container_size();
                debug!("Populating {} with {} elements", descriptor.type_ref, size);

                let element = descriptor.nested(element.as_ref().clone());
                self.populate_set(&element, size, ctx).map(Value::Set)
            }
            TypeRef::Map { key, value } => {
                if self.element_blocked(key, ctx) || self.element_blocked(value, ctx) {
                    return Ok(Value::Map(Vec::new()));
                }
                let size = ctx.next_container_size();
                debug!("Populating {} with {} entries", descriptor.type_ref, size);

                let key = descriptor.nested(key.as_ref().clone());
                let value = descriptor.nested(value.as_ref().clone());
                self.populate_map(&key, &value, size, ctx).map(Value::Map)
            }
            _ => Err(PopulateError::unresolvable(descriptor)),
        }
    }

    /// Collect up to `size` distinct elements.
    ///
    /// Gives up after `SET_RETRY_FACTOR * size` attempts and returns the
    /// smaller set, so element types with few possible values still
    /// terminate.
    fn populate_set(
        &self,
        element: &TypeDescriptor,
        size: usize,
        ctx: &mut RandomizationContext,
    ) -> Result<Vec<Value>, PopulateError> {
        let mut items: Vec<Value> = Vec::with_capacity(size);
        let mut attempts = 0;

        while items.len() < size && attempts < size * SET_RETRY_FACTOR {
            attempts += 1;
            let candidate = self.populate_descriptor(element, ctx)?;
            if !items.contains(&candidate) {
                items.push(candidate);
            }
        }

        if items.len() < size {
            debug!(
                "Set of {} has {} of {} requested elements after {} attempts",
                element.type_ref,
                items.len(),
                size,
                attempts
            );
        }
        Ok(items)
    }

    /// Generate `size` entries; a repeated key replaces the earlier value.
    fn populate_map(
        &self,
        key: &TypeDescriptor,
        value: &TypeDescriptor,
        size: usize,
        ctx: &mut RandomizationContext,
    ) -> Result<Vec<(Value, Value)>, PopulateError> {
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(size);

        for _ in 0..size {
            let k = self.populate_descriptor(key, ctx)?;
            let v = self.populate_descriptor(value, ctx)?;
            match entries.iter_mut().find(|(existing, _)| *existing == k) {
                Some(entry) => entry.1 = v,
                None => entries.push((k, v)),
            }
        }

        Ok(entries)
    }

    fn element_blocked(&self, element: &TypeRef, ctx: &RandomizationContext) -> bool {
        match element {
            TypeRef::Named(name) => self.is_blocked(name, ctx),
            _ => false,
        }
    }
}
