//! Drives a real `HttpServer` over TCP, the way the binary runs it.

use actix_web::{middleware::Logger, App, HttpServer};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;

use taskgate::auth::TokenService;
use taskgate::routes::{self, health};
use taskgate::store::InMemoryUserStore;
use taskgate::AppState;

fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let state = AppState::new(
        Arc::new(InMemoryUserStore::new()),
        TokenService::new("server_test_secret", Duration::hours(1)),
    );
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .service(health::health)
            .configure(|cfg| routes::config(cfg, &state))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    actix_rt::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

#[actix_rt::test]
async fn test_end_to_end_over_http() {
    let base = spawn_server();
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/auth/register", base))
        .json(&json!({ "username": "alice", "email": "a@x.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let user: Value = resp.json().await.unwrap();
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());

    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "email": "a@x.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let login: Value = resp.json().await.unwrap();
    let token = login["access_token"].as_str().unwrap().to_string();

    let resp = client
        .get(format!("{}/users/me", base))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let me: Value = resp.json().await.unwrap();
    assert_eq!(me["id"], user["id"]);

    let resp = client
        .get(format!("{}/users/me", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "email": "a@x.com", "password": "wrong-one" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}
