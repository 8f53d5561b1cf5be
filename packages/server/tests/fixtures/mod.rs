//! Test server and client helpers shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use serde_json::json;
use tokio::{net::TcpListener, task::JoinHandle};
use tsudoi_server::{ServerConfig, ui::serve};

/// A server bound to an ephemeral port, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            serve(listener, ServerConfig::default(), std::future::pending())
                .await
                .expect("Test server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room_id: i64, token: &str) -> String {
        format!("ws://{}/ws/{}?token={}", self.addr, room_id, token)
    }

    /// Register `username` and log in, returning `(user_id, access_token)`
    pub async fn signup(&self, client: &reqwest::Client, username: &str) -> (i64, String) {
        let credentials = json!({"username": username, "password": "secret-password"});

        let response = client
            .post(format!("{}/api/register", self.base_url()))
            .json(&credentials)
            .send()
            .await
            .expect("Failed to send register request");
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = client
            .post(format!("{}/api/login", self.base_url()))
            .json(&credentials)
            .send()
            .await
            .expect("Failed to send login request")
            .json()
            .await
            .expect("Failed to parse JSON");

        let user_id = body["user_id"].as_i64().expect("user_id missing");
        let token = body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string();
        (user_id, token)
    }

    /// Poll the room detail until `user_id` is (or is no longer) listed in it
    pub async fn wait_for_presence(
        &self,
        client: &reqwest::Client,
        token: &str,
        room_id: i64,
        user_id: i64,
        present: bool,
    ) {
        for _ in 0..50 {
            let body: serde_json::Value = client
                .get(format!("{}/api/chat/rooms/{}", self.base_url(), room_id))
                .bearer_auth(token)
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse JSON");
            let listed = body["users"]
                .as_array()
                .is_some_and(|users| users.iter().any(|u| u["id"] == user_id));
            if listed == present {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("user {user_id} presence in room {room_id} never became {present}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
