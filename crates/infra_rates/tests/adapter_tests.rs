//! Adapter tests against a canned local HTTP server

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use core_kernel::{AdapterHealth, Currency, HealthCheckable, PortError};
use domain_exchange::{CurrencyLoader, ExchangeRateLoader};
use infra_rates::{ExchangeRateApiAdapter, ExchangeRateApiConfig};

/// Serves the same response to every connection and records request lines
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                if let Some(line) = request.lines().next() {
                    seen.lock().push(line.to_string());
                }
                let response = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}/v6", addr),
            requests,
        }
    }

    fn adapter(&self) -> ExchangeRateApiAdapter {
        ExchangeRateApiAdapter::new(ExchangeRateApiConfig {
            base_url: self.base_url.clone(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn request_lines(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

fn usd() -> Currency {
    Currency::new("USD", "United States Dollar").unwrap()
}

fn eur() -> Currency {
    Currency::new("EUR", "Euro").unwrap()
}

mod currencies {
    use super::*;

    #[tokio::test]
    async fn test_load_all_in_service_order() {
        let server = StubServer::start(
            200,
            r#"{"result":"success","supported_codes":[["EUR","Euro"],["USD","United States Dollar"]]}"#,
        )
        .await;

        let currencies = server.adapter().load_all().await;

        assert_eq!(currencies, vec![eur(), usd()]);
        assert_eq!(server.request_lines(), vec!["GET /v6/test-key/codes HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_load_all_is_empty_on_error_envelope() {
        let server =
            StubServer::start(200, r#"{"result":"error","error-type":"invalid-key"}"#).await;

        assert!(server.adapter().load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_currencies_surfaces_unauthorized() {
        let server =
            StubServer::start(403, r#"{"result":"error","error-type":"invalid-key"}"#).await;

        let error = server.adapter().fetch_currencies().await.unwrap_err();

        assert!(matches!(error, PortError::Unauthorized { .. }));
    }
}

mod rates {
    use super::*;

    #[tokio::test]
    async fn test_load_pair() {
        let server = StubServer::start(
            200,
            r#"{"result":"success","base_code":"USD","target_code":"EUR","conversion_rate":0.92}"#,
        )
        .await;

        let rate = server.adapter().load(&usd(), &eur()).await.unwrap();

        assert_eq!(rate.rate(), dec!(0.92));
        assert_eq!(rate.from(), &usd());
        assert_eq!(rate.to(), &eur());
        assert_eq!(
            server.request_lines(),
            vec!["GET /v6/test-key/pair/USD/EUR HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_each_load_asks_the_service() {
        let server = StubServer::start(200, r#"{"result":"success","conversion_rate":1.1}"#).await;
        let adapter = server.adapter();

        adapter.load(&usd(), &eur()).await.unwrap();
        adapter.load(&usd(), &eur()).await.unwrap();

        assert_eq!(server.request_lines().len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_code_is_not_found() {
        let server =
            StubServer::start(404, r#"{"result":"error","error-type":"unsupported-code"}"#).await;

        let error = server.adapter().load(&usd(), &eur()).await.unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_without_body_is_unavailable() {
        let server = StubServer::start(502, "Bad Gateway").await;

        let error = server.adapter().load(&usd(), &eur()).await.unwrap_err();

        assert!(matches!(error, PortError::ServiceUnavailable { .. }));
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_garbage_body_is_transformation_error() {
        let server = StubServer::start(200, "<html>oops</html>").await;

        let error = server.adapter().load(&usd(), &eur()).await.unwrap_err();

        assert!(matches!(error, PortError::Transformation { .. }));
    }

    #[tokio::test]
    async fn test_errors_never_leak_the_key() {
        let server = StubServer::start(500, "").await;

        let error = server.adapter().load(&usd(), &eur()).await.unwrap_err();

        assert!(!error.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let adapter = ExchangeRateApiAdapter::new(ExchangeRateApiConfig {
            base_url: format!("http://{}/v6", addr),
            api_key: "test-key".to_string(),
            timeout_secs: 2,
        })
        .unwrap();

        let error = adapter.load(&usd(), &eur()).await.unwrap_err();

        assert!(error.is_transient());
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_healthy_when_codes_listed() {
        let server = StubServer::start(
            200,
            r#"{"result":"success","supported_codes":[["USD","United States Dollar"]]}"#,
        )
        .await;

        let result = server.adapter().health_check().await;

        assert!(result.is_healthy());
        assert_eq!(result.adapter_id, "exchangerate-api");
    }

    #[tokio::test]
    async fn test_unhealthy_with_rejected_key() {
        let server =
            StubServer::start(401, r#"{"result":"error","error-type":"invalid-key"}"#).await;

        let result = server.adapter().health_check().await;

        assert_eq!(result.status, AdapterHealth::Unhealthy);
        assert!(result.message.is_some());
    }

    #[tokio::test]
    async fn test_degraded_when_rate_limited() {
        let server =
            StubServer::start(429, r#"{"result":"error","error-type":"quota-reached"}"#).await;

        let result = server.adapter().health_check().await;

        assert_eq!(result.status, AdapterHealth::Degraded);
    }
}

#[test]
fn test_client_timeout_follows_config() {
    let adapter = ExchangeRateApiAdapter::new(ExchangeRateApiConfig {
        timeout_secs: 7,
        ..ExchangeRateApiConfig::new("k")
    })
    .unwrap();
    assert_eq!(adapter.config().timeout(), Duration::from_secs(7));
}
