use std::collections::BTreeSet;

use crate::model::ids::LessonId;

/// Ids of lessons the viewer has finished, accumulated during a session.
///
/// The set only grows: there is no un-complete operation. The navigator
/// receives it as an input and never mutates it itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: BTreeSet<LessonId>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lesson as finished. Idempotent; returns true if the id was
    /// newly added.
    pub fn mark(&mut self, id: LessonId) -> bool {
        self.ids.insert(id)
    }

    #[must_use]
    pub fn contains(&self, id: LessonId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Completed ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<LessonId> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = LessonId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent() {
        let mut set = CompletionSet::new();
        assert!(set.mark(LessonId::new(10)));
        assert!(!set.mark(LessonId::new(10)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ids_come_back_sorted() {
        let set: CompletionSet = [LessonId::new(12), LessonId::new(10), LessonId::new(11)]
            .into_iter()
            .collect();
        let ids: Vec<u64> = set.ids().map(|id| id.value()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn empty_set_contains_nothing() {
        let set = CompletionSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(LessonId::new(1)));
    }
}
