/// HTTP-backed `Actor` for the platform's v3 API.
///
/// Every response may carry advisory warnings in the `X-Cf-Warnings` header:
/// a comma-separated list of URL-encoded strings. They are decoded in order
/// and returned to the caller whether or not the request succeeded.
use std::borrow::Cow;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Deserialize;
use tracing::{debug, warn};

use super::errors::{IdentityError, ResolveError};
use super::{Actor, User, Warnings};
use crate::quota::SpaceQuota;
use crate::session::{Config, SessionConfig};

/// Response header carrying advisory warnings.
pub const WARNINGS_HEADER: &str = "X-Cf-Warnings";

/// Platform API client holding the credentials of the current session.
pub struct PlatformActor {
    http: Client,
    api_endpoint: String,
    access_token: Option<String>,
    user_name: Option<String>,
}

impl PlatformActor {
    /// Build a client from the session configuration.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Transport` if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: &SessionConfig) -> Result<Self, ResolveError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_owned(),
            access_token: config.access_token().map(str::to_owned),
            user_name: config.user_name().map(str::to_owned),
        })
    }
}

impl Actor for PlatformActor {
    fn current_user(&self) -> Result<User, IdentityError> {
        if self.access_token.is_none() {
            return Err(IdentityError::NotLoggedIn);
        }
        let name = self.user_name.clone().ok_or(IdentityError::MissingUser)?;
        Ok(User { name })
    }

    fn get_space_quota_by_name(
        &self,
        name: &str,
        org_guid: &str,
    ) -> (Result<SpaceQuota, ResolveError>, Warnings) {
        let url = format!(
            "{}/v3/space_quotas?names={}&organization_guids={}",
            self.api_endpoint,
            urlencoding::encode(name),
            urlencoding::encode(org_guid),
        );
        debug!(%url, "requesting space quota");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.access_token {
            request = request.header(AUTHORIZATION, authorization_value(token));
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "space quota request failed");
                return (Err(err.into()), Warnings::new());
            }
        };

        let warnings = decode_warnings(response.headers());
        debug!(
            status = response.status().as_u16(),
            warnings = warnings.len(),
            "space quota response"
        );

        (read_space_quota(response, name), warnings)
    }
}

/// One page of a v3 listing. Only the first page is read.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default)]
    resources: Vec<T>,
}

/// v3 error envelope: `{"errors": [{"code": .., "title": .., "detail": ..}]}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

fn read_space_quota(response: Response, name: &str) -> Result<SpaceQuota, ResolveError> {
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        return Err(ResolveError::Remote {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    let page: Page<SpaceQuota> = serde_json::from_str(&body)?;
    page.resources
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::NotFound {
            name: name.to_owned(),
        })
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.errors.is_empty() => envelope
            .errors
            .iter()
            .map(|e| match (e.title.is_empty(), e.detail.is_empty()) {
                (false, false) => format!("{}: {}", e.title, e.detail),
                (true, _) => e.detail.clone(),
                (false, true) => e.title.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_owned(),
    }
}

/// Split and decode every `X-Cf-Warnings` header value, preserving order.
fn decode_warnings(headers: &HeaderMap) -> Warnings {
    headers
        .get_all(WARNINGS_HEADER)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(decode_warning)
        .collect()
}

/// Query-escaped: `+` is a space and a literal plus arrives as `%2B`.
fn decode_warning(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), Cow::into_owned)
}

fn authorization_value(token: &str) -> String {
    if token
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "))
    {
        token.to_owned()
    } else {
        format!("bearer {token}")
    }
}
