//! The HTTP gateway: request building for the GitHub and expire APIs, and the transport that
//! actually puts them on the wire via Octocrab.

use http::header::{ACCEPT, AUTHORIZATION};
use http::{HeaderMap, HeaderName, Method, StatusCode};
use http_body_util::BodyExt;
use log::debug;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::OctocrabBuilder;
use serde::Deserialize;
use url::Url;

use crate::config::{ExpireCredentials, GithubCredentials};
use crate::error::{Error, Result};

pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const X_GITHUB_API_VERSION: HeaderName = HeaderName::from_static("x-github-api-version");
const X_API_PRIVATE_TOKEN: HeaderName = HeaderName::from_static("x-api-private-token");

/// The parts of a GitHub user account we care about
///
/// See: https://docs.github.com/en/rest/users/users?apiVersion=2022-11-28#get-a-user
#[derive(Debug, Deserialize)]
pub struct Account {
    pub id: u64,
    pub login: String,
}

/// A fully built outbound request. Header names are unique.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(HeaderName, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> ApiRequest {
        ApiRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request to the GitHub API with bearer auth and the GitHub JSON media type
    pub fn github(credentials: &GithubCredentials, method: Method, url: Url) -> ApiRequest {
        ApiRequest::new(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", credentials.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(X_GITHUB_API_VERSION, GITHUB_API_VERSION)
    }

    /// A request to the private expire API, authenticated with its private token header
    pub fn expire(credentials: &ExpireCredentials, method: Method, url: Url) -> ApiRequest {
        ApiRequest::new(method, url).header(X_API_PRIVATE_TOKEN, credentials.token.clone())
    }

    /// Set a header, replacing any earlier value under the same name
    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> ApiRequest {
        let value = value.into();
        match self.headers.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> ApiRequest {
        self.body = Some(body);
        self
    }

    #[cfg(test)]
    pub fn header_value(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Append path segments to a base URL. Each segment is percent-encoded, so a
/// user supplied name can never escape its place in the path.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Performs exactly one HTTP request per call
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// The real transport, backed by Octocrab with retries switched off
#[derive(Debug, Default)]
pub struct OctocrabTransport;

impl Transport for OctocrabTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = request
            .headers
            .iter()
            .fold(OctocrabBuilder::default(), |builder, (name, value)| {
                builder.add_header(name.clone(), value.clone())
            });
        builder.add_retry_config(RetryConfig::None);
        let octocrab = builder.build()?;

        let uri = request.url.as_str();
        let response = match request.method {
            Method::GET => octocrab._get(uri).await?,
            Method::POST => octocrab._post(uri, request.body.as_ref()).await?,
            Method::PATCH => octocrab._patch(uri, request.body.as_ref()).await?,
            ref other => {
                return Err(Error::Transport(format!("unsupported method {other}")));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await?.to_bytes();

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Wraps a transport with request logging
#[derive(Debug)]
pub struct Gateway<T: Transport> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T) -> Gateway<T> {
        Gateway { transport }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!("{method} {url}");
        let response = self.transport.send(request).await?;
        debug!("{method} {url} -> {}", response.status);
        Ok(response)
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
