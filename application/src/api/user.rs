//! [`User`]-related HTTP endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use common::pagination::Order;
use serde::{Deserialize, Deserializer, Serialize};
use service::{
    command::{self, refresh_user::Refreshed},
    domain::{
        user::{self, Plan, RefreshDateTime, Role},
        User,
    },
    query,
    read::user::list,
    Command as _, Query as _,
};

use crate::{define_error, AsError, Error, Service};

define_error! {
    enum UserError {
        #[code = "USER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Пользователь не найден"]
        NotFound,

        #[code = "EMAIL_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Email обязателен"]
        EmailRequired,
    }
}

define_error! {
    enum FailureError {
        #[code = "LIST_USERS_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Ошибка получения пользователей"]
        List,

        #[code = "GET_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Ошибка получения пользователя"]
        Get,

        #[code = "CREATE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Ошибка создания пользователя"]
        Create,

        #[code = "UPDATE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Ошибка обновления пользователя"]
        Update,

        #[code = "DELETE_USER_FAILED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Ошибка удаления пользователя"]
        Delete,
    }
}

/// Message of a successful [`delete()`].
const DELETED_MESSAGE: &str = "Пользователь удален";

/// Message of a successful [`refresh()`].
const REFRESHED_MESSAGE: &str = "Данные пользователя обновлены";

/// Query parameters of [`list()`].
///
/// Parsed leniently: malformed values fall back to their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    /// 1-based number of the requested page.
    pub page: Option<String>,

    /// Maximum number of [`User`]s on a page.
    pub limit: Option<String>,

    /// Case-insensitive email substring.
    pub search: Option<String>,

    /// Field to sort by.
    pub sort_by: Option<String>,

    /// Whether to sort in descending order (`true`).
    pub desc: Option<String>,
}

impl ListParams {
    /// Converts these [`ListParams`] into a [`list::Selector`].
    #[must_use]
    pub fn into_selector(self) -> list::Selector {
        let Self {
            page,
            limit,
            search,
            sort_by,
            desc,
        } = self;

        let default = list::Arguments::default();
        let arguments = list::Arguments::new(
            positive(page.as_deref()).unwrap_or(default.page()),
            positive(limit.as_deref()).unwrap_or(default.limit()),
        )
        .unwrap_or(default);

        list::Selector {
            arguments,
            filter: list::Filter {
                search: search.unwrap_or_default(),
            },
            sorting: list::Sorting {
                by: sort_by
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
                order: Order::from_desc(desc.as_deref() == Some("true")),
            },
        }
    }
}

/// Parses a positive integer, if any.
fn positive(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok().filter(|n| *n > 0)
}

/// Page of [`User`]s returned by [`list()`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// [`User`]s on the page.
    pub data: Vec<User>,

    /// Total number of [`User`]s matching the search.
    pub total: usize,

    /// 1-based number of the page.
    pub page: usize,

    /// Maximum number of [`User`]s on a page.
    pub limit: usize,

    /// Total number of pages.
    pub total_pages: usize,
}

impl From<list::Page> for Listing {
    fn from(page: list::Page) -> Self {
        Self {
            total_pages: page.total_pages(),
            page: page.arguments.page(),
            limit: page.arguments.limit(),
            total: page.total,
            data: page.items,
        }
    }
}

/// Body of [`create()`].
#[derive(Clone, Debug, Deserialize)]
pub struct CreateBody {
    /// Email of the new [`User`].
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of [`update()`].
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateBody {
    /// New email of the [`User`].
    ///
    /// Blank email keeps the current one.
    #[serde(default)]
    pub email: Option<String>,

    /// New [`Role`] of the [`User`].
    #[serde(default)]
    pub role: Option<Role>,

    /// New [`Plan`] of the [`User`].
    ///
    /// Explicit `null` removes the [`Plan`], while an absent field keeps it.
    #[serde(default, deserialize_with = "present")]
    pub plan: Option<Option<Plan>>,
}

/// Deserializes a present field, distinguishing `null` from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response of [`delete()`].
#[derive(Clone, Debug, Serialize)]
pub struct Deleted {
    /// Human-readable message.
    pub message: &'static str,

    /// Deleted [`User`].
    pub user: User,
}

/// Response of [`refresh()`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refresh {
    /// Human-readable message.
    pub message: &'static str,

    /// ID of the refreshed [`User`].
    pub user_id: user::Id,

    /// Moment of the refresh.
    pub timestamp: RefreshDateTime,
}

impl From<Refreshed> for Refresh {
    fn from(out: Refreshed) -> Self {
        Self {
            message: REFRESHED_MESSAGE,
            user_id: out.user_id,
            timestamp: out.timestamp,
        }
    }
}

/// Lists a page of [`User`]s.
///
/// # Errors
///
/// Errors if the query string cannot be parsed.
#[tracing::instrument(skip_all)]
pub async fn list(
    Extension(service): Extension<Service>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Listing>, Error> {
    let Query(params) = params.map_err(AsError::into_error)?;

    let page = service
        .execute(query::users::List::by(params.into_selector()))
        .await
        .map_err(|e| e.into_error_or(FailureError::List))?;

    Ok(Json(page.into()))
}

/// Returns a single [`User`].
///
/// # Errors
///
/// Errors with `404` if the [`User`] doesn't exist.
#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<User>, Error> {
    service
        .execute(query::user::ById::by(id.into()))
        .await
        .map_err(|e| e.into_error_or(FailureError::Get))?
        .ok_or_else(|| UserError::NotFound.into())
        .map(Json)
}

/// Creates a new [`User`].
///
/// # Errors
///
/// Errors with `400` if no email is provided.
#[tracing::instrument(skip_all)]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), Error> {
    let Json(CreateBody { email }) = body.map_err(AsError::into_error)?;

    let user = service
        .execute(command::CreateUser {
            email: email.and_then(user::Email::new),
        })
        .await
        .map_err(|e| e.into_error_or(FailureError::Create))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates an existing [`User`].
///
/// # Errors
///
/// Errors with `404` if the [`User`] doesn't exist.
#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<User>, Error> {
    let Json(UpdateBody { email, role, plan }) =
        body.map_err(AsError::into_error)?;

    service
        .execute(command::UpdateUser {
            user_id: id.into(),
            email: email.and_then(user::Email::new),
            role,
            plan,
        })
        .await
        .map_err(|e| e.into_error_or(FailureError::Update))
        .map(Json)
}

/// Deletes a [`User`].
///
/// # Errors
///
/// Errors with `404` if the [`User`] doesn't exist.
#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, Error> {
    let user = service
        .execute(command::DeleteUser::from(user::Id::from(id)))
        .await
        .map_err(|e| e.into_error_or(FailureError::Delete))?;

    Ok(Json(Deleted {
        message: DELETED_MESSAGE,
        user,
    }))
}

/// Refreshes a [`User`]'s data.
///
/// Never fails, even for an unknown [`User`].
#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn refresh(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Json<Refresh> {
    let Ok(out) = service
        .execute(command::RefreshUser::from(user::Id::from(id)))
        .await;
    Json(out.into())
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailRequired => Some(UserError::EmailRequired.into()),
        }
    }
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotFound.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::read::user::list::SortBy;

    use super::{ListParams, UpdateBody};

    fn params(query: &str) -> ListParams {
        serde_json::from_value(
            query
                .split('&')
                .filter(|kv| !kv.is_empty())
                .map(|kv| {
                    let (k, v) = kv.split_once('=').unwrap_or((kv, ""));
                    (k.to_owned(), serde_json::Value::from(v))
                })
                .collect::<serde_json::Map<_, _>>()
                .into(),
        )
        .unwrap()
    }

    #[test]
    fn parses_defaults() {
        let selector = params("").into_selector();

        assert_eq!(selector.arguments.page(), 1);
        assert_eq!(selector.arguments.limit(), 10);
        assert_eq!(selector.filter.search, "");
        assert_eq!(selector.sorting.by, SortBy::Email);
        assert!(!selector.sorting.order.is_desc());
    }

    #[test]
    fn parses_leniently() {
        let selector =
            params("page=abc&limit=0&sortBy=name&desc=yes").into_selector();

        assert_eq!(selector.arguments.page(), 1);
        assert_eq!(selector.arguments.limit(), 10);
        assert_eq!(selector.sorting.by, SortBy::Email);
        assert!(!selector.sorting.order.is_desc());
    }

    #[test]
    fn parses_provided() {
        let selector =
            params("page=3&limit=20&search=Anna&sortBy=createdAt&desc=true")
                .into_selector();

        assert_eq!(selector.arguments.page(), 3);
        assert_eq!(selector.arguments.limit(), 20);
        assert_eq!(selector.filter.search, "Anna");
        assert_eq!(selector.sorting.by, SortBy::CreatedAt);
        assert!(selector.sorting.order.is_desc());
    }

    #[test]
    fn distinguishes_null_plan_from_absent() {
        let absent: UpdateBody = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.plan, None);

        let null: UpdateBody =
            serde_json::from_str(r#"{"plan": null}"#).unwrap();
        assert_eq!(null.plan, Some(None));

        let pro: UpdateBody =
            serde_json::from_str(r#"{"plan": "pro", "role": "admin"}"#)
                .unwrap();
        assert_eq!(pro.plan, Some(Some(service::domain::user::Plan::Pro)));
    }
}
