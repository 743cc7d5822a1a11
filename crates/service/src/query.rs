//! Equality predicates over repository items and the typed conversion step
//! shared by every entity listing.

use models::{errors::ModelError, PropertyValue, RepositoryItem};

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// `property == value`
    Eq { property: &'static str, value: PropertyValue },
    /// `property` equals any of `values`
    In { property: &'static str, values: Vec<PropertyValue> },
}

impl Predicate {
    pub fn equals(property: &'static str, value: impl Into<PropertyValue>) -> Self {
        Predicate::Eq { property, value: value.into() }
    }

    pub fn any_of<V: Into<PropertyValue>>(property: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In { property, values: values.into_iter().map(Into::into).collect() }
    }

    pub fn test(&self, item: &RepositoryItem) -> bool {
        match self {
            Predicate::Eq { property, value } => item.property(property) == Some(value),
            Predicate::In { property, values } => item.property(property).map(|v| values.contains(v)).unwrap_or(false),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combine {
    /// Every predicate must hold; vacuously true when empty.
    All,
    /// At least one predicate must hold; false when empty.
    Any,
}

#[derive(Clone, Debug)]
pub struct ItemFilter {
    predicates: Vec<Predicate>,
    combine: Combine,
}

impl ItemFilter {
    pub fn all(predicates: Vec<Predicate>) -> Self { Self { predicates, combine: Combine::All } }

    pub fn any(predicates: Vec<Predicate>) -> Self { Self { predicates, combine: Combine::Any } }

    pub fn matches(&self, item: &RepositoryItem) -> bool {
        match self.combine {
            Combine::All => self.predicates.iter().all(|p| p.test(item)),
            Combine::Any => self.predicates.iter().any(|p| p.test(item)),
        }
    }

    /// Keep matching items, preserving order.
    pub fn apply(&self, items: Vec<RepositoryItem>) -> Vec<RepositoryItem> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

/// Convert every item; the first failure aborts the whole listing.
pub fn convert_all<T>(items: &[RepositoryItem]) -> Result<Vec<T>, ServiceError>
where
    T: for<'a> TryFrom<&'a RepositoryItem, Error = ModelError>,
{
    items.iter().map(|i| T::try_from(i).map_err(ServiceError::from)).collect()
}
