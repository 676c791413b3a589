//! Liveness endpoint

use axum::Json as AxumJson;
use serde::Serialize;

const SERVICE_NAME: &str = "mygram";

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

impl Liveness {
    fn current() -> Self {
        Self {
            service: SERVICE_NAME,
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Answers while the process is serving requests; touches no storage
pub async fn health_check() -> AxumJson<Liveness> {
    AxumJson(Liveness::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_body() {
        let AxumJson(body) = health_check().await;

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["service"], "mygram");
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }
}
