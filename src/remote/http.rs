use std::io::Read;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::RemoteError;
use crate::remote::Authority;

/// Largest reply body accepted from a node.
const MAX_REPLY: usize = 1 << 20;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP authority for a node's internal API (default `127.0.0.1:3113`).
///
/// Every request is bounded by one deadline covering connect, headers and
/// body, and the body is capped at 1 MiB.
pub struct HttpAuthority {
    base: String,
    client: Client,
    timeout: Duration,
}

impl HttpAuthority {
    /// `addr` is `host:port`; `base_path` is prepended to every endpoint,
    /// e.g. `/v2`.
    pub fn new(addr: &str, base_path: &str) -> Result<Self, RemoteError> {
        let base = format!("http://{addr}{}", base_path.trim_end_matches('/'));
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            base,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the per-request deadline (30 s by default).
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
            ..self
        })
    }

    fn request_error(&self, endpoint: &str, reason: impl ToString) -> RemoteError {
        RemoteError::Request {
            endpoint: endpoint.to_string(),
            reason: format!("{}: {}", self.base, reason.to_string()),
        }
    }

    /// Read the reply body under the request deadline and the size cap.
    fn read_body(
        &self,
        endpoint: &str,
        mut resp: reqwest::blocking::Response,
        deadline: Instant,
    ) -> Result<String, RemoteError> {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = resp
                .read(&mut chunk)
                .map_err(|e| self.request_error(endpoint, e))?;
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            if raw.len() > MAX_REPLY {
                return Err(self.request_error(
                    endpoint,
                    format!("reply larger than {MAX_REPLY} bytes"),
                ));
            }
            if Instant::now() > deadline {
                return Err(self.request_error(
                    endpoint,
                    format!("no complete reply within {:?}", self.timeout),
                ));
            }
        }
        String::from_utf8(raw).map_err(|e| RemoteError::Reply {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

fn build_client(timeout: Duration) -> Result<Client, RemoteError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .build()
        .map_err(|e| RemoteError::Request {
            endpoint: String::new(),
            reason: format!("cannot build HTTP client: {e}"),
        })
}

impl Authority for HttpAuthority {
    fn post(&self, endpoint: &str, body: &str) -> Result<String, RemoteError> {
        let deadline = Instant::now() + self.timeout;
        let url = format!("{}{}", self.base, endpoint);
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| self.request_error(endpoint, e))?;

        let status = resp.status();
        let reply = self.read_body(endpoint, resp, deadline)?;
        log::trace!("{endpoint} -> {}", status.as_u16());
        if !status.is_success() {
            return Err(RemoteError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: reply,
            });
        }
        Ok(reply)
    }
}
