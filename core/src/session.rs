//! The transport seam.
//!
//! A `Session` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. Authentication, cookies and timeouts belong to the
//! implementor; non-2xx statuses must come back as data so the client can
//! interpret them.

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Blocking HTTP round-trip.
pub trait Session {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<S: Session + ?Sized> Session for &S {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_session::UreqSession;

#[cfg(feature = "ureq")]
mod ureq_session {
    use tracing::debug;

    use super::Session;
    use crate::error::{ApiError, Result};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Session` backed by a blocking `ureq` agent.
    ///
    /// Headers added with `with_header` go out on every request, which is
    /// where auth cookies or an `Origin` header belong.
    #[derive(Clone)]
    pub struct UreqSession {
        agent: ureq::Agent,
        headers: Vec<(String, String)>,
    }

    impl UreqSession {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self {
                agent,
                headers: Vec::new(),
            }
        }

        pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.headers.push((name.into(), value.into()));
            self
        }
    }

    impl Default for UreqSession {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Session for UreqSession {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            debug!(method = request.method.as_str(), url = %request.url, "sending request");
            let headers = self.headers.iter().chain(&request.headers);
            let query = request.query.iter().map(|(k, v)| (k.as_str(), v.as_str()));

            let response = match request.method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(&request.url).query_pairs(query);
                    for (name, value) in headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Post => {
                    let mut builder = self.agent.post(&request.url).query_pairs(query);
                    for (name, value) in headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match &request.body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };
            let mut response = response.map_err(ApiError::transport)?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(ApiError::transport)?;
            debug!(status, "received response");

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
