//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.
    //!
    //! The list is filtered, sorted and paginated entirely in memory by
    //! [`select()`], a pure function over the provided [`User`]s.

    use std::cmp::Ordering;

    use common::{define_kind, define_pagination, pagination::Order};

    use crate::domain::User;

    define_pagination!(User, Filter, Sorting);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Case-insensitive substring to search [`User`]'s email for.
        ///
        /// Empty string matches all the [`User`]s.
        pub search: String,
    }

    impl Filter {
        /// Checks whether the provided [`User`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            self.search.is_empty()
                || user
                    .email
                    .as_ref()
                    .to_lowercase()
                    .contains(&self.search.to_lowercase())
        }
    }

    define_kind! {
        #[doc = "Field to sort [`User`]s by."]
        enum SortBy {
            #[doc = "Sort by email, lexicographically."]
            Email = "email",

            #[doc = "Sort by creation instant."]
            CreatedAt = "createdAt",

            #[doc = "Sort by role name, lexicographically."]
            Role = "role",
        }
    }

    impl Default for SortBy {
        fn default() -> Self {
            Self::Email
        }
    }

    /// Sorting for [`Selector`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Sorting {
        /// Field to sort by.
        pub by: SortBy,

        /// [`Order`] of sorting.
        pub order: Order,
    }

    impl Sorting {
        /// Compares two [`User`]s according to this [`Sorting`].
        #[must_use]
        pub fn compare(&self, a: &User, b: &User) -> Ordering {
            let ordering = match self.by {
                SortBy::Email => a.email.as_ref().cmp(b.email.as_ref()),
                SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                SortBy::Role => a.role.as_str().cmp(b.role.as_str()),
            };
            self.order.apply(ordering)
        }
    }

    /// Selects a [`Page`] of the provided [`User`]s.
    ///
    /// Sorting is stable: [`User`]s with equal keys keep their relative input
    /// order in both directions.
    #[must_use]
    pub fn select<'u>(
        selector: &Selector,
        users: impl IntoIterator<Item = &'u User>,
    ) -> Page {
        let Selector {
            arguments,
            filter,
            sorting,
        } = selector;

        let mut matched = users
            .into_iter()
            .filter(|u| filter.matches(u))
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| sorting.compare(a, b));

        Page {
            items: arguments
                .slice(&matched)
                .iter()
                .copied()
                .cloned()
                .collect(),
            total: matched.len(),
            arguments: *arguments,
        }
    }

}
