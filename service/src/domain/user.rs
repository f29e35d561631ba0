//! [`User`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// User record of the listing.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Role`] of this [`User`].
    pub role: Role,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,

    /// Subscription [`Plan`] of this [`User`], if any.
    pub plan: Option<Plan>,
}

/// ID of a [`User`].
///
/// Unique and stable for the lifetime of a [`User`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] from its sequence number.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Returns the sequence number of this [`Id`], if it's numeric.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        !address.as_ref().trim().is_empty()
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

impl TryFrom<String> for Email {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

define_kind! {
    #[doc = "Role of a [`User`]."]
    enum Role {
        #[doc = "Administrator, not editable from the listing."]
        Admin = "admin",

        #[doc = "Editor."]
        Editor = "editor",

        #[doc = "Read-only viewer."]
        Viewer = "viewer",
    }
}

define_kind! {
    #[doc = "Subscription plan of a [`User`]."]
    enum Plan {
        #[doc = "Free plan."]
        Free = "free",

        #[doc = "Paid plan."]
        Pro = "pro",

        #[doc = "Enterprise plan."]
        Enterprise = "enterprise",
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

/// [`DateTime`] when a [`User`] was refreshed.
pub type RefreshDateTime = DateTimeOf<(User, unit::Refresh)>;

#[cfg(test)]
mod spec {
    use super::{Email, Id, Plan, Role, User};

    #[test]
    fn email_must_not_be_blank() {
        assert!(Email::new("").is_none());
        assert!(Email::new("   ").is_none());
        assert!(Email::new("anna.sidorova3@outlook.com").is_some());
    }

    #[test]
    fn id_numbers() {
        assert_eq!(Id::from_number(42).number(), Some(42));
        assert_eq!(Id::from("abc").number(), None);
    }

    #[test]
    fn json_shape() {
        let json = r#"{
            "id": "4",
            "email": "maria.kozlov4@company.com",
            "role": "editor",
            "createdAt": "2023-04-05T16:20:00Z",
            "plan": null
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, Id::from("4"));
        assert_eq!(user.role, Role::Editor);
        assert_eq!(user.plan, None);

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["createdAt"], "2023-04-05T16:20:00Z");
        assert_eq!(value["plan"], serde_json::Value::Null);
        assert_eq!(value["role"], "editor");

        let with_plan: User = serde_json::from_str(
            &json.replace("null", "\"enterprise\""),
        )
        .unwrap();
        assert_eq!(with_plan.plan, Some(Plan::Enterprise));
    }

    #[test]
    fn rejects_blank_email() {
        let json = r#"{
            "id": "1",
            "email": "",
            "role": "admin",
            "createdAt": "2023-01-15T10:30:00Z",
            "plan": "pro"
        }"#;

        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn kinds_parse() {
        assert_eq!("viewer".parse::<Role>().ok(), Some(Role::Viewer));
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Plan::Pro.to_string(), "pro");
    }
}
