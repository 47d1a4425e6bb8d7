#![allow(dead_code)]

use std::{io, net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use server::{
    config::Config, database::VisitStore, error::AppError, models::VisitRecord, router,
    state::AppState,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

pub enum FakeStore {
    Down,
    Up(Vec<VisitRecord>),
}

#[async_trait]
impl VisitStore for FakeStore {
    async fn ping(&self) -> Result<(), AppError> {
        match self {
            FakeStore::Down => Err(network_error()),
            FakeStore::Up(_) => Ok(()),
        }
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, AppError> {
        match self {
            FakeStore::Down => Err(network_error()),
            FakeStore::Up(visits) => Ok(visits.iter().take(limit as usize).cloned().collect()),
        }
    }
}

pub fn network_error() -> AppError {
    AppError::Io(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "server selection timeout: connection refused",
    ))
}

pub fn visit(id: &str, date: &str, name: &str) -> VisitRecord {
    VisitRecord {
        id: Some(id.to_string()),
        date: Some(date.to_string()),
        name: Some(name.to_string()),
        location: Some("Seattle".to_string()),
        kind: Some("pho".to_string()),
        rating: Some("8".to_string()),
        price: Some("$15".to_string()),
        notes: None,
    }
}

pub fn config() -> Config {
    Config {
        port: 0,
        mongodb_uri: None,
        database: "personal".to_string(),
        collection: "pho-tracker".to_string(),
    }
}

pub async fn spawn(store: FakeStore) -> SocketAddr {
    let state = AppState::with_store(config(), Arc::new(store));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move { axum::serve(listener, router(state)).await.expect("serve app") });

    addr
}

pub async fn send_raw(addr: SocketAddr, method: &str, path: &str) -> (u16, String, String) {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");

    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");

    (status, head.to_string(), body.to_string())
}
