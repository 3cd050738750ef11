//! Relation preservation between input and output positions
//!
//! Groups positions that share an input PIN so they can share an output PIN.
//! The first position of each group is its representative; groups are
//! numbered in order of first appearance.

use crate::domain::{Pin, PinError, Result};
use std::collections::HashMap;

/// Mapping from input positions to output groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMap {
    group_of: Vec<usize>,
    representatives: Vec<usize>,
}

impl RelationMap {
    /// Builds the grouping for `source`
    ///
    /// With `keep_rel = false` every position is its own group.
    ///
    /// # Examples
    ///
    /// ```
    /// use pnr_synth::core::relation::RelationMap;
    /// use pnr_synth::domain::Pin;
    ///
    /// let a = Pin::new("196408233233").unwrap();
    /// let b = Pin::new("199001018936").unwrap();
    /// let map = RelationMap::build(&[a.clone(), b, a], true);
    /// assert_eq!(map.group_count(), 2);
    /// assert_eq!(map.representatives(), &[0, 1]);
    /// ```
    pub fn build(source: &[Pin], keep_rel: bool) -> Self {
        if !keep_rel {
            return Self::identity(source.len());
        }

        let mut first_seen: HashMap<&Pin, usize> = HashMap::with_capacity(source.len());
        let mut group_of = Vec::with_capacity(source.len());
        let mut representatives = Vec::new();

        for (position, pin) in source.iter().enumerate() {
            let group = *first_seen.entry(pin).or_insert_with(|| {
                representatives.push(position);
                representatives.len() - 1
            });
            group_of.push(group);
        }

        Self {
            group_of,
            representatives,
        }
    }

    /// Singleton grouping over `len` positions
    pub fn identity(len: usize) -> Self {
        Self {
            group_of: (0..len).collect(),
            representatives: (0..len).collect(),
        }
    }

    /// Number of input positions
    pub fn len(&self) -> usize {
        self.group_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_of.is_empty()
    }

    /// Number of distinct output values needed
    pub fn group_count(&self) -> usize {
        self.representatives.len()
    }

    /// First input position of each group, in group order
    pub fn representatives(&self) -> &[usize] {
        &self.representatives
    }

    /// Group index of an input position
    pub fn group_of(&self, position: usize) -> Option<usize> {
        self.group_of.get(position).copied()
    }

    /// Expands one value per group to one value per input position
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidParameter`] if `values` does not hold exactly
    /// one value per group.
    pub fn broadcast<T: Clone>(&self, values: &[T]) -> Result<Vec<T>> {
        if values.len() != self.group_count() {
            return Err(PinError::InvalidParameter(format!(
                "expected {} group values, got {}",
                self.group_count(),
                values.len()
            )));
        }
        Ok(self.group_of.iter().map(|&g| values[g].clone()).collect())
    }
}
