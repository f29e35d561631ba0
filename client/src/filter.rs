//! Filter selections of the users listing.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use smart_default::SmartDefault;

pub use service::read::user::list::SortBy;

/// Number of [`User`]s on a listing page.
///
/// [`User`]: service::domain::User
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PageSize {
    /// 10 per page.
    Ten,

    /// 20 per page.
    #[default]
    Twenty,

    /// 50 per page.
    Fifty,
}

impl PageSize {
    /// All the [`PageSize`]s, in ascending order.
    pub const ALL: [Self; 3] = [Self::Ten, Self::Twenty, Self::Fifty];

    /// Returns the number of items on a page of this [`PageSize`].
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// Looks up the [`PageSize`] holding exactly `limit` items.
    #[must_use]
    pub fn from_limit(limit: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.get() == limit)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for PageSize {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::from_limit)
            .ok_or("unsupported `PageSize`")
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Current filter selections of the listing.
///
/// Mutated only through [`State::apply()`]ing [`Action`]s.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct State {
    /// Raw search input, as typed.
    search: String,

    /// Search committed after the quiet period, lagging [`State::search`].
    debounced_search: String,

    /// Field to sort by.
    sort_by: SortBy,

    /// Whether sorting is descending.
    desc: bool,

    /// Number of items on a page.
    page_size: PageSize,

    /// 1-based number of the current page.
    #[default(1)]
    current_page: usize,
}

/// Named mutation of a [`State`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Sets the raw search input, returning to the first page.
    SetSearch(String),

    /// Sets the field to sort by, staying on the current page.
    SetSortBy(SortBy),

    /// Sets the sorting direction, staying on the current page.
    SetDesc(bool),

    /// Sets the [`PageSize`], returning to the first page.
    SetPageSize(PageSize),

    /// Sets the current page, bumping zero to the first one.
    ///
    /// The upper bound is the caller's concern.
    SetCurrentPage(usize),

    /// Commits the debounced search.
    ///
    /// Dispatched by the [`Debounce`] only.
    ///
    /// [`Debounce`]: crate::Debounce
    CommitDebouncedSearch(String),

    /// Resets every field to its default, the committed search included.
    Reset,
}

impl State {
    /// Applies the provided [`Action`] to this [`State`].
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetSearch(search) => {
                self.search = search;
                self.current_page = 1;
            }
            Action::SetSortBy(by) => self.sort_by = by,
            Action::SetDesc(desc) => self.desc = desc,
            Action::SetPageSize(size) => {
                self.page_size = size;
                self.current_page = 1;
            }
            Action::SetCurrentPage(page) => self.current_page = page.max(1),
            Action::CommitDebouncedSearch(search) => {
                self.debounced_search = search;
            }
            Action::Reset => *self = Self::default(),
        }
    }

    /// Returns the raw search input.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the committed search.
    #[must_use]
    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    /// Returns the field to sort by.
    #[must_use]
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Indicates whether sorting is descending.
    #[must_use]
    pub fn desc(&self) -> bool {
        self.desc
    }

    /// Returns the [`PageSize`].
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the 1-based number of the current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }
}
