//! Domination relation between condition categories.
//!
//! When a patient carries a more severe category, the less severe categories
//! it dominates are dropped before scoring. Published tables list the full
//! dominated set for each category; [`HierarchyRelation::reduce`] produces the
//! minimal relation with the same transitive meaning, and
//! [`HierarchyRelation::closure`] goes the other way.

use crate::categories::ConditionCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("hierarchy contains a cycle through {category}")]
    Cycle { category: ConditionCategory },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyRelation {
    edges: BTreeMap<ConditionCategory, BTreeSet<ConditionCategory>>,
}

impl HierarchyRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a relation from `(dominant, [dominated...])` pairs.
    pub fn from_pairs<'p, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u16, &'p [u16])>,
    {
        let mut relation = Self::new();
        for (dominant, dominated) in pairs {
            relation.edges.entry(ConditionCategory(dominant)).or_default();
            for &category in dominated {
                relation.insert(ConditionCategory(dominant), ConditionCategory(category));
            }
        }
        relation
    }

    pub fn insert(&mut self, dominant: ConditionCategory, dominated: ConditionCategory) {
        self.edges.entry(dominant).or_default().insert(dominated);
    }

    /// Categories directly listed as dominated by `category`.
    pub fn dominated_by(
        &self,
        category: ConditionCategory,
    ) -> impl Iterator<Item = ConditionCategory> + '_ {
        self.edges
            .get(&category)
            .into_iter()
            .flat_map(|dominated| dominated.iter().copied())
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (ConditionCategory, &BTreeSet<ConditionCategory>)> + '_ {
        self.edges.iter().map(|(category, dominated)| (*category, dominated))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every category reachable from `start`, not counting `start` itself
    /// unless a cycle leads back to it.
    pub fn reachable_from(&self, start: ConditionCategory) -> BTreeSet<ConditionCategory> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<ConditionCategory> = self.dominated_by(start).collect();
        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend(self.dominated_by(next));
            }
        }
        seen
    }

    /// Drops every edge `A -> C` where `C` is already reachable through another
    /// member of `A`'s dominated set. Computed against `self`, never against a
    /// partially reduced copy.
    pub fn reduce(&self) -> Self {
        let edges = self
            .edges
            .iter()
            .map(|(&dominant, dominated)| {
                let implied: BTreeSet<ConditionCategory> = dominated
                    .iter()
                    .flat_map(|&middle| self.reachable_from(middle))
                    .collect();
                let kept = dominated
                    .iter()
                    .copied()
                    .filter(|category| !implied.contains(category))
                    .collect();
                (dominant, kept)
            })
            .collect();
        Self { edges }
    }

    /// Transitive closure: every key maps to everything it reaches.
    pub fn closure(&self) -> Self {
        let edges = self
            .edges
            .keys()
            .map(|&dominant| (dominant, self.reachable_from(dominant)))
            .collect();
        Self { edges }
    }

    pub fn validate_acyclic(&self) -> Result<(), HierarchyError> {
        match self
            .edges
            .keys()
            .find(|&&category| self.reachable_from(category).contains(&category))
        {
            Some(&category) => Err(HierarchyError::Cycle { category }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn categories(numbers: &[u16]) -> BTreeSet<ConditionCategory> {
        numbers.iter().copied().map(ConditionCategory).collect()
    }

    #[test]
    fn reduce_drops_transitively_implied_edges() {
        let relation = HierarchyRelation::from_pairs([
            (17, &[18, 19][..]),
            (18, &[19][..]),
        ]);
        let reduced = relation.reduce();

        assert_eq!(
            reduced.dominated_by(ConditionCategory(17)).collect::<BTreeSet<_>>(),
            categories(&[18])
        );
        assert_eq!(
            reduced.dominated_by(ConditionCategory(18)).collect::<BTreeSet<_>>(),
            categories(&[19])
        );
    }

    #[test]
    fn reduce_keeps_edges_without_alternate_path() {
        let relation = HierarchyRelation::from_pairs([
            (27, &[28, 29, 80][..]),
            (28, &[29][..]),
        ]);
        let reduced = relation.reduce();
        assert_eq!(
            reduced.dominated_by(ConditionCategory(27)).collect::<BTreeSet<_>>(),
            categories(&[28, 80])
        );
    }

    #[test]
    fn reduce_is_computed_from_original_relation() {
        // Reducing 8 first must not hide 9 -> 10 -> 11 paths from later keys.
        let relation = HierarchyRelation::from_pairs([
            (8, &[9, 10, 11, 12][..]),
            (9, &[10, 11, 12][..]),
            (10, &[11, 12][..]),
            (11, &[12][..]),
        ]);
        let reduced = relation.reduce();
        for (dominant, expected) in [(8, 9), (9, 10), (10, 11), (11, 12)] {
            assert_eq!(
                reduced.dominated_by(ConditionCategory(dominant)).collect::<Vec<_>>(),
                vec![ConditionCategory(expected)]
            );
        }
    }

    #[test]
    fn empty_relation_reduces_to_empty() {
        assert!(HierarchyRelation::new().reduce().is_empty());
    }

    #[test]
    fn cycle_is_reported() {
        let relation = HierarchyRelation::from_pairs([(1, &[2][..]), (2, &[1][..])]);
        assert!(matches!(
            relation.validate_acyclic(),
            Err(HierarchyError::Cycle { .. })
        ));
    }

    fn acyclic_relation() -> impl Strategy<Value = HierarchyRelation> {
        prop::collection::vec((0u16..12, 1u16..12), 0..40).prop_map(|pairs| {
            let mut relation = HierarchyRelation::new();
            for (low, span) in pairs {
                let high = low + span;
                relation.insert(ConditionCategory(low), ConditionCategory(high));
            }
            relation
        })
    }

    proptest! {
        #[test]
        fn reduce_preserves_closure(relation in acyclic_relation()) {
            prop_assert_eq!(relation.reduce().closure(), relation.closure());
        }

        #[test]
        fn reduce_is_idempotent(relation in acyclic_relation()) {
            let once = relation.reduce();
            prop_assert_eq!(once.reduce(), once);
        }

        #[test]
        fn reduced_edges_are_subset(relation in acyclic_relation()) {
            let reduced = relation.reduce();
            for (dominant, dominated) in reduced.iter() {
                for category in dominated {
                    prop_assert!(relation.dominated_by(dominant).any(|c| c == *category));
                }
            }
        }
    }
}
