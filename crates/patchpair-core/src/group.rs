//! Single-or-sequence image groups.
//!
//! Every operation works on a sequence internally. [`Group`] remembers
//! whether the caller passed one buffer or a list, so the result comes back
//! in the same shape: single in, single out; list in, list of the same
//! length and order out.

use crate::error::TransformError;

/// One buffer, or an ordered sequence of buffers sharing a spatial shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Group<B> {
    Single(B),
    Many(Vec<B>),
}

impl<B> Group<B> {
    pub fn single(item: B) -> Self {
        Group::Single(item)
    }

    pub fn many(items: Vec<B>) -> Self {
        Group::Many(items)
    }

    pub fn len(&self) -> usize {
        match self {
            Group::Single(_) => 1,
            Group::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Group::Single(_))
    }

    /// The buffer whose shape stands for the whole group.
    pub fn first(&self) -> Option<&B> {
        match self {
            Group::Single(item) => Some(item),
            Group::Many(items) => items.first(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        match self {
            Group::Single(item) => std::slice::from_ref(item).iter(),
            Group::Many(items) => items.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<B> {
        match self {
            Group::Single(item) => vec![item],
            Group::Many(items) => items,
        }
    }

    /// Returns the buffer of a `Single` group.
    pub fn into_single(self) -> Option<B> {
        match self {
            Group::Single(item) => Some(item),
            Group::Many(_) => None,
        }
    }

    /// Like [`Group::first`], but an empty list is an error.
    pub(crate) fn require_first(&self) -> Result<&B, TransformError> {
        self.first().ok_or(TransformError::EmptyGroup)
    }

    /// Applies `f` to every buffer in order, keeping the group's shape.
    pub fn try_map<U, E>(self, mut f: impl FnMut(B) -> Result<U, E>) -> Result<Group<U>, E> {
        match self {
            Group::Single(item) => f(item).map(Group::Single),
            Group::Many(items) => items
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()
                .map(Group::Many),
        }
    }
}

impl<B> From<Vec<B>> for Group<B> {
    fn from(items: Vec<B>) -> Self {
        Group::Many(items)
    }
}

impl<B> IntoIterator for Group<B> {
    type Item = B;
    type IntoIter = std::vec::IntoIter<B>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
