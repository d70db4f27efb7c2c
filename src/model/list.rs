use crate::signal::Signal;
use std::ops::Range;

/// Structural or content change of an ordered list.
///
/// Ranges are half-open row ranges in the coordinate space of the list that
/// emitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    AboutToInsert(Range<usize>),
    Inserted(Range<usize>),
    AboutToRemove(Range<usize>),
    Removed(Range<usize>),
    AboutToReset,
    Reset,
    LayoutAboutToChange,
    LayoutChanged,
    DataChanged(Range<usize>),
    /// Row count may have changed
    CountChanged,
}

impl ListChange {
    /// Same change with every row index moved by `offset`.
    ///
    /// Whole-list changes carry no rows and are returned unchanged.
    pub fn shifted(&self, offset: usize) -> ListChange {
        let shift = |r: &Range<usize>| (r.start + offset)..(r.end + offset);
        match self {
            Self::AboutToInsert(r) => Self::AboutToInsert(shift(r)),
            Self::Inserted(r) => Self::Inserted(shift(r)),
            Self::AboutToRemove(r) => Self::AboutToRemove(shift(r)),
            Self::Removed(r) => Self::Removed(shift(r)),
            Self::DataChanged(r) => Self::DataChanged(shift(r)),
            other => other.clone(),
        }
    }

    /// True for the "post" notifications after which the row count may differ
    pub fn affects_count(&self) -> bool {
        matches!(
            self,
            Self::Inserted(_) | Self::Removed(_) | Self::Reset | Self::LayoutChanged
        )
    }
}

/// An ordered list that announces its changes
pub trait ObservableList {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row at `index`, or None when out of range
    fn row(&self, index: usize) -> Option<Self::Item>;

    fn changes(&self) -> &Signal<ListChange>;
}
