//! Generation of mock [`User`]s.

use std::time::Duration;

use rand::{seq::IndexedRandom as _, Rng};

use crate::domain::{
    user::{self, CreationDateTime, Plan, Role},
    User,
};

use super::Memory;

/// First names mock emails are composed of.
const FIRST_NAMES: &[&str] = &[
    "Иван",
    "Петр",
    "Анна",
    "Мария",
    "Алексей",
    "Елена",
    "Дмитрий",
    "Ольга",
    "Сергей",
    "Наталья",
    "Андрей",
    "Татьяна",
    "Михаил",
    "Екатерина",
    "Владимир",
    "Светлана",
    "Николай",
    "Юлия",
    "Александр",
    "Ирина",
];

/// Last names mock emails are composed of.
const LAST_NAMES: &[&str] = &[
    "Иванов",
    "Петров",
    "Сидорова",
    "Козлова",
    "Смирнов",
    "Кузнецова",
    "Попов",
    "Васильева",
    "Соколов",
    "Новикова",
    "Морозов",
    "Федорова",
    "Волков",
    "Морозова",
    "Алексеев",
    "Лебедева",
    "Семенов",
    "Егорова",
    "Павлов",
    "Козлова",
];

/// Domains of mock emails.
const DOMAINS: &[&str] =
    &["gmail.com", "yahoo.com", "outlook.com", "company.com", "test.com"];

/// Possible [`Plan`]s, absent one included.
const PLANS: &[Option<Plan>] =
    &[Some(Plan::Free), Some(Plan::Pro), Some(Plan::Enterprise), None];

/// Maximum age of a mock [`User`].
const MAX_AGE: Duration = Duration::from_secs(2 * 365 * 24 * 60 * 60);

/// Picks a uniformly random element of the non-empty `items`.
fn pick<'i, T, R>(rng: &mut R, items: &'i [T]) -> &'i T
where
    R: Rng + ?Sized,
{
    items
        .choose(rng)
        .unwrap_or_else(|| unreachable!("never empty"))
}

/// Generates `count` mock [`User`]s with [`user::Id`]s from `1` to `count`.
pub fn generate<R>(count: u64, rng: &mut R) -> Vec<User>
where
    R: Rng + ?Sized,
{
    let now = CreationDateTime::now();
    let max_age_ms = u64::try_from(MAX_AGE.as_millis()).unwrap_or(u64::MAX);

    (1..=count)
        .map(|i| {
            let first = pick(rng, FIRST_NAMES).to_lowercase();
            let last = pick(rng, LAST_NAMES).to_lowercase();
            let domain = pick(rng, DOMAINS);
            let age = Duration::from_millis(rng.random_range(0..max_age_ms));

            User {
                id: user::Id::from_number(i),
                email: user::Email::new(format!("{first}.{last}{i}@{domain}"))
                    .unwrap_or_else(|| unreachable!("never blank")),
                role: *pick(rng, Role::ALL),
                created_at: now - age,
                plan: *pick(rng, PLANS),
            }
        })
        .collect()
}

impl Memory {
    /// Creates a new [`Memory`] database filled with `count` mock [`User`]s
    /// generated by the provided `rng`.
    #[must_use]
    pub fn seeded<R>(count: u64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(generate(count, rng))
    }

    /// Creates a new [`Memory`] database filled with `count` mock [`User`]s
    /// generated by the thread-local random generator.
    #[must_use]
    pub fn mock(count: u64) -> Self {
        Self::seeded(count, &mut rand::rng())
    }
}
