//! Abstractions for offset pagination.

use std::{cmp::Ordering, num::NonZeroUsize};

/// Page-number based pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested page.
    page: NonZeroUsize,

    /// Maximum number of items on a page.
    limit: NonZeroUsize,
}

impl Arguments {
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if either `page` or `limit` is zero.
    #[must_use]
    pub fn new(page: usize, limit: usize) -> Option<Self> {
        Some(Self {
            page: NonZeroUsize::new(page)?,
            limit: NonZeroUsize::new(limit)?,
        })
    }

    /// Returns the 1-based page number requested by these [`Arguments`].
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.get()
    }

    /// Returns the page size requested by these [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Returns the part of `items` falling onto the requested page.
    ///
    /// Pages beyond the end of `items` are empty.
    #[must_use]
    pub fn slice<'i, T>(&self, items: &'i [T]) -> &'i [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit()).min(items.len());
        &items[start..end]
    }

    /// Returns the number of pages needed to hold `total` items.
    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit())
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            page: NonZeroUsize::MIN,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A page of `I`tems.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// Total number of items matching the filter, before pagination.
    pub total: usize,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,
}

impl<I> Page<I> {
    /// Returns the total number of pages available.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.arguments.total_pages(self.total)
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Default)]
pub struct Selector<F, S> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Filter being applied before pagination.
    pub filter: F,

    /// Sorting being applied before pagination.
    pub sorting: S,
}

/// Order of sorting.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns [`Order::Descending`] if `desc` is `true`.
    #[must_use]
    pub const fn from_desc(desc: bool) -> Self {
        if desc {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Indicates whether this [`Order`] is descending.
    #[must_use]
    pub const fn is_desc(self) -> bool {
        matches!(self, Self::Descending)
    }

    /// Applies this [`Order`] to the ascending `ordering`.
    ///
    /// [`Ordering::Equal`] stays equal, so stable sorts keep relative order of
    /// equal items in both directions.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty, $sorting:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter, $sorting>;
    };
}
