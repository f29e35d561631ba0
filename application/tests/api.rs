//! HTTP API integration tests.
//!
//! Starts the axum server and exercises it with reqwest.

use std::time::Duration;

use application::Service;
use serde_json::{json, Value};
use service::{
    domain::{
        user::{self, CreationDateTime, Plan, Role},
        User,
    },
    infra::Memory,
    Config,
};

fn users() -> Vec<User> {
    let base = CreationDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    (1..=100)
        .map(|i| User {
            id: user::Id::from_number(i),
            email: user::Email::new(format!("user{i:03}@test.com")).unwrap(),
            role: Role::ALL[usize::try_from(i).unwrap() % Role::ALL.len()],
            created_at: base - Duration::from_secs(i * 60),
            plan: (i % 2 == 0).then_some(Plan::Pro),
        })
        .collect()
}

/// Binds to port 0 and returns the actual base URL.
async fn start_server() -> String {
    let service = Service::new(Config::default(), Memory::new(users()));
    let app = application::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    }));
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "ok": true }));
}

#[tokio::test]
async fn lists_first_page_by_email() {
    let base = start_server().await;

    let body = reqwest::get(format!(
        "{base}/api/users?page=1&limit=10&sortBy=email&desc=false",
    ))
    .await
    .unwrap()
    .json::<Value>()
    .await
    .unwrap();

    assert_eq!(body["total"], 100);
    assert_eq!(body["totalPages"], 10);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    let emails = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(
        emails,
        (1..=10)
            .map(|i| format!("user{i:03}@test.com"))
            .collect::<Vec<_>>(),
    );
}

#[tokio::test]
async fn lists_nothing_on_no_match() {
    let base = start_server().await;

    let body = reqwest::get(format!("{base}/api/users?search=zzz-no-match"))
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();

    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 0);
}

#[tokio::test]
async fn lists_with_lenient_params() {
    let base = start_server().await;

    let body = reqwest::get(format!(
        "{base}/api/users?page=-3&limit=x&sortBy=unknown&desc=TRUE",
    ))
    .await
    .unwrap()
    .json::<Value>()
    .await
    .unwrap();

    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["data"][0]["email"], "user001@test.com");
}

#[tokio::test]
async fn gets_user() {
    let base = start_server().await;

    let resp = reqwest::get(format!("{base}/api/users/2")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let user = resp.json::<Value>().await.unwrap();
    assert_eq!(user["id"], "2");
    assert_eq!(user["email"], "user002@test.com");
    assert_eq!(user["plan"], "pro");

    let resp = reqwest::get(format!("{base}/api/users/3")).await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap()["plan"], Value::Null);

    let resp = reqwest::get(format!("{base}/api/users/404")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Пользователь не найден" }),
    );
}

#[tokio::test]
async fn updates_user() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/users/2"))
        .json(&json!({ "role": "admin", "plan": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let user = resp.json::<Value>().await.unwrap();
    assert_eq!(user["role"], "admin");
    assert_eq!(user["plan"], Value::Null);
    assert_eq!(user["email"], "user002@test.com");

    let resp = client
        .put(format!("{base}/api/users/nope"))
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn deletes_user() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/users/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Пользователь удален");
    assert_eq!(body["user"]["id"], "5");

    let resp = client
        .delete(format!("{base}/api/users/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Пользователь не найден" }),
    );

    let body = reqwest::get(format!("{base}/api/users"))
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["total"], 99);
}

#[tokio::test]
async fn refreshes_user() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/users/7/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["message"], "Данные пользователя обновлены");
    assert_eq!(body["userId"], "7");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    let resp = client
        .post(format!("{base}/api/users/abc/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["userId"], "abc");
    assert_eq!(body["message"], "Данные пользователя обновлены");
}

#[tokio::test]
async fn creates_user() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/users"))
        .json(&json!({ "email": "new@test.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let user = resp.json::<Value>().await.unwrap();
    assert_eq!(user["id"], "101");
    assert_eq!(user["role"], "viewer");
    assert_eq!(user["plan"], Value::Null);

    for body in [json!({}), json!({ "email": "" })] {
        let resp = client
            .post(format!("{base}/api/users"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(
            resp.json::<Value>().await.unwrap(),
            json!({ "error": "Email обязателен" }),
        );
    }
}
