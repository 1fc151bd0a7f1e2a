//! Prop tables - explicit name → setter registration.
//!
//! Every prop a component understands is listed in a [`PropTable`] built once
//! at startup. Building validates the table, so a typo'd or doubled name is a
//! construction error instead of a silently dead prop.

use std::collections::HashMap;
use std::rc::Rc;

use super::value::PropValue;
use crate::engine::MaterialSource;
use crate::error::BindingError;

/// Collaborators a setter may need besides the node itself.
pub struct BindContext<'a> {
    pub materials: &'a mut dyn MaterialSource,
}

/// A setter: convert `value` and apply it to the target.
///
/// Setters report failure through the return value and never log; the
/// dispatch loop owns logging.
pub type Setter<N> = Rc<dyn Fn(&mut N, &PropValue, &mut BindContext<'_>) -> Result<(), BindingError>>;

/// One registered prop.
pub struct PropEntry<N> {
    pub name: &'static str,
    pub setter: Setter<N>,
}

impl<N> Clone for PropEntry<N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            setter: Rc::clone(&self.setter),
        }
    }
}

/// Validated, immutable prop table.
pub struct PropTable<N> {
    entries: Vec<PropEntry<N>>,
    index: HashMap<&'static str, usize>,
}

impl<N> Clone for PropTable<N> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<N: 'static> PropTable<N> {
    pub fn builder() -> PropTableBuilder<N> {
        PropTableBuilder::new()
    }
}

impl<N> PropTable<N> {
    pub fn get(&self, name: &str) -> Option<&Setter<N>> {
        self.index.get(name).map(|&i| &self.entries[i].setter)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one prop.
    pub fn apply(
        &self,
        target: &mut N,
        name: &str,
        value: &PropValue,
        ctx: &mut BindContext<'_>,
    ) -> Result<(), BindingError> {
        let setter = self
            .get(name)
            .ok_or_else(|| BindingError::UnknownProp(name.to_string()))?;
        setter(target, value, ctx)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects entries for a [`PropTable`].
pub struct PropTableBuilder<N> {
    entries: Vec<PropEntry<N>>,
    overrides: Vec<PropEntry<N>>,
}

impl<N: 'static> Default for PropTableBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: 'static> PropTableBuilder<N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Register a prop.
    pub fn prop<F>(mut self, name: &'static str, setter: F) -> Self
    where
        F: Fn(&mut N, &PropValue, &mut BindContext<'_>) -> Result<(), BindingError> + 'static,
    {
        self.entries.push(PropEntry {
            name,
            setter: Rc::new(setter),
        });
        self
    }

    /// Copy every entry of an existing table.
    pub fn extend(mut self, table: &PropTable<N>) -> Self {
        self.entries.extend(table.entries.iter().cloned());
        self
    }

    /// Apply a registration function, for sharing prop sets between tables.
    pub fn with(self, register: impl FnOnce(Self) -> Self) -> Self {
        register(self)
    }

    /// Replace the setter of an already registered prop.
    ///
    /// Overriding a name that was never registered fails at build time.
    pub fn override_prop<F>(mut self, name: &'static str, setter: F) -> Self
    where
        F: Fn(&mut N, &PropValue, &mut BindContext<'_>) -> Result<(), BindingError> + 'static,
    {
        self.overrides.push(PropEntry {
            name,
            setter: Rc::new(setter),
        });
        self
    }

    /// Validate and freeze the table.
    pub fn build(self) -> Result<PropTable<N>, BindingError> {
        let mut entries = self.entries;
        let mut index = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(BindingError::EmptyPropName);
            }
            if index.insert(entry.name, i).is_some() {
                return Err(BindingError::DuplicateProp(entry.name));
            }
        }

        for replacement in self.overrides {
            let &i = index
                .get(replacement.name)
                .ok_or_else(|| BindingError::UnknownProp(replacement.name.to_string()))?;
            entries[i] = replacement;
        }

        Ok(PropTable { entries, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MaterialRegistry;

    #[derive(Default)]
    struct Counter {
        value: f64,
    }

    fn set_value(counter: &mut Counter, value: &PropValue, _ctx: &mut BindContext<'_>) -> Result<(), BindingError> {
        counter.value = value
            .as_f64()
            .ok_or_else(|| BindingError::invalid("value", "number", value.type_name()))?;
        Ok(())
    }

    #[test]
    fn test_build_and_apply() {
        let table = PropTable::builder().prop("value", set_value).build().unwrap();
        let mut materials = MaterialRegistry::new();
        let mut ctx = BindContext { materials: &mut materials };
        let mut counter = Counter::default();

        table.apply(&mut counter, "value", &PropValue::Number(3.0), &mut ctx).unwrap();
        assert_eq!(counter.value, 3.0);

        let err = table.apply(&mut counter, "missing", &PropValue::Null, &mut ctx).unwrap_err();
        assert!(matches!(err, BindingError::UnknownProp(name) if name == "missing"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = PropTable::<Counter>::builder()
            .prop("value", set_value)
            .prop("value", set_value)
            .build();
        assert!(matches!(result, Err(BindingError::DuplicateProp("value"))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = PropTable::<Counter>::builder().prop("", set_value).build();
        assert!(matches!(result, Err(BindingError::EmptyPropName)));
    }

    #[test]
    fn test_extend_and_override() {
        let base = PropTable::builder().prop("value", set_value).build().unwrap();
        let table = PropTable::builder()
            .extend(&base)
            .override_prop("value", |counter: &mut Counter, _: &PropValue, _: &mut BindContext<'_>| {
                counter.value = -1.0;
                Ok(())
            })
            .build()
            .unwrap();

        let mut materials = MaterialRegistry::new();
        let mut ctx = BindContext { materials: &mut materials };
        let mut counter = Counter::default();
        table.apply(&mut counter, "value", &PropValue::Number(3.0), &mut ctx).unwrap();
        assert_eq!(counter.value, -1.0);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["value"]);
    }

    #[test]
    fn test_override_unknown_rejected() {
        let result = PropTable::<Counter>::builder().override_prop("value", set_value).build();
        assert!(matches!(result, Err(BindingError::UnknownProp(_))));
    }
}
