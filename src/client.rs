use std::time::Duration;

use reqwest::{
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Body, Method, Request, Response,
};
use thiserror::Error;
use url::Url;

use crate::model::Revision;

const ANONYMOUS_TOKEN: &str = "anonymous";
// Extra time given to a watch request on top of the server-side wait.
const WATCH_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP Client error")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid token received")]
    InvalidTokenValue,
    #[error("Invalid URL")]
    InvalidURL(#[from] url::ParseError),
    #[error("Failed to parse json")]
    ParseError(#[from] serde_json::Error),
    #[error("Error response: [{0}] {1}")]
    ErrorResponse(u16, String),
    #[error("Invalid params: {0}")]
    InvalidParams(&'static str),
}

impl Error {
    /// Returns the HTTP status code this error was caused by, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ErrorResponse(code, _) => Some(*code),
            Error::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Builder of a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Url of the Central Dogma server, e.g. `http://localhost:36462`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Access token sent as `Authorization: Bearer <token>`.
    /// Requests are sent as `anonymous` when no token is set.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Timeout of a single request. Does not apply to watch requests,
    /// which are bounded by their own wait time.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = self
            .base_url
            .ok_or(Error::InvalidParams("base_url is required"))?;
        let base_url = Url::parse(&base_url)?;

        let token = self.token.as_deref().unwrap_or(ANONYMOUS_TOKEN);
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::InvalidTokenValue)?;
        authorization.set_sensitive(true);

        Ok(Client {
            base_url,
            authorization,
            timeout: self.timeout,
            http_client: reqwest::Client::builder().build()?,
        })
    }
}

/// Root client of the Central Dogma API.
///
/// Project APIs are called on the client directly, repository APIs through
/// [`Client::project`] and content APIs through [`Client::repo`].
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    authorization: HeaderValue,
    timeout: Option<Duration>,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a new client for the server at `base_url`.
    pub async fn new(base_url: &str, token: Option<&str>) -> Result<Self, Error> {
        let mut builder = Client::builder().base_url(base_url);
        if let Some(token) = token {
            builder = builder.token(token);
        }

        builder.build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Returns a client bound to the project `name`.
    pub fn project<'a>(&'a self, name: &'a str) -> ProjectClient<'a> {
        ProjectClient {
            client: self,
            project: name,
        }
    }

    /// Returns a client bound to the repository `repo_name` of project `project_name`.
    pub fn repo<'a>(&'a self, project_name: &'a str, repo_name: &'a str) -> RepoClient<'a> {
        RepoClient {
            client: self,
            project: project_name,
            repo: repo_name,
        }
    }

    /// Sends a request prepared by this client.
    pub async fn request(&self, req: Request) -> Result<Response, Error> {
        log::debug!("{} {}", req.method(), req.url());

        Ok(self.http_client.execute(req).await?)
    }

    pub(crate) fn new_request<S: AsRef<str>>(
        &self,
        method: Method,
        path: S,
        body: Option<Body>,
    ) -> Result<Request, Error> {
        let mut req = self.new_request_inner(method, path.as_ref(), body)?;
        *req.timeout_mut() = self.timeout;

        Ok(req)
    }

    pub(crate) fn new_watch_request<S: AsRef<str>>(
        &self,
        method: Method,
        path: S,
        body: Option<Body>,
        last_known_revision: Revision,
        timeout: Duration,
    ) -> Result<Request, Error> {
        let mut req = self.new_request_inner(method, path.as_ref(), body)?;

        let revision = last_known_revision.as_i64().unwrap_or(-1);
        let headers = req.headers_mut();
        headers.insert("if-none-match", HeaderValue::from(revision));
        headers.insert(
            "prefer",
            HeaderValue::from_str(&format!("wait={}", timeout.as_secs()))
                .map_err(|_| Error::InvalidParams("invalid watch timeout"))?,
        );
        *req.timeout_mut() = Some(timeout + WATCH_TIMEOUT_MARGIN);

        Ok(req)
    }

    fn new_request_inner(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<Request, Error> {
        let mut req = Request::new(method, self.base_url.join(path)?);
        req.headers_mut()
            .insert(AUTHORIZATION, self.authorization.clone());

        if body.is_some() {
            let content_type = if *req.method() == Method::PATCH {
                "application/json-patch+json"
            } else {
                "application/json"
            };
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        *req.body_mut() = body;

        Ok(req)
    }
}

/// A [`Client`] bound to a project. Repository APIs live here.
#[derive(Debug, Clone, Copy)]
pub struct ProjectClient<'a> {
    pub(crate) client: &'a Client,
    pub(crate) project: &'a str,
}

/// A [`Client`] bound to a repository. Content and watch APIs live here.
#[derive(Debug, Clone, Copy)]
pub struct RepoClient<'a> {
    pub(crate) client: &'a Client,
    pub(crate) project: &'a str,
    pub(crate) repo: &'a str,
}
