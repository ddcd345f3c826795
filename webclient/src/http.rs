use std::time::Duration;

use ::reqwest::header::{self, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

pub use ::reqwest::{Error, Method, Request, Response, StatusCode};

use crate::error;

/// Thin wrapper around `reqwest::Client` bound to one base URL.
/// Every request built through it passes [`Client::intercept`], which attaches
/// the bearer token if one is set.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

macro_rules! emit_request_fn {
    ($method:ident) => {
        pub fn $method(&self, segments: &[&str]) -> error::Result<RequestBuilder> {
            let url = self.endpoint(segments)?;
            Ok(RequestBuilder::new(self.inner.$method(url), self.clone()))
        }
    };
}

impl Client {
    pub fn new(base_url: Url, timeout: Duration) -> error::Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(error::Error::CannotBeABase(base_url.to_string()));
        }
        let inner = ::reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            inner,
            base_url,
            bearer_token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn set_bearer_token(&mut self, token: impl Into<String>) {
        self.bearer_token = Some(token.into());
    }

    pub fn clear_bearer_token(&mut self) {
        self.bearer_token = None;
    }

    /// Appends path segments to the base URL. Segments are percent-encoded.
    ///
    /// ```
    /// use std::time::Duration;
    /// use codeiv_webclient::{http::Client, Url};
    ///
    /// let base = Url::parse("http://localhost:5000/api/").unwrap();
    /// let cli = Client::new(base, Duration::from_secs(5)).unwrap();
    /// let url = cli.endpoint(&["questions", "two sum"]).unwrap();
    /// assert_eq!(url.as_str(), "http://localhost:5000/api/questions/two%20sum");
    /// ```
    pub fn endpoint(&self, segments: &[&str]) -> error::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| error::Error::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    emit_request_fn!(get);
    emit_request_fn!(post);
    emit_request_fn!(put);
    emit_request_fn!(patch);
    emit_request_fn!(delete);

    /// Request interceptor: `Authorization: Bearer <token>`.
    pub fn intercept(&self, req: &mut Request) {
        let Some(token) = &self.bearer_token else {
            return
        };
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                req.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(e) => log::warn!("Ignoring bearer token unusable as a header value: {}", e),
        }
    }

    pub(crate) async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        log::debug!("{} {}", req.method(), req.url());
        self.inner.execute(req).await
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        Self { inner: b, client }
    }

    /// Builds the request and runs it through the interceptor without sending it.
    pub fn build(self) -> Result<Request, Error> {
        let mut req = self.inner.build()?;
        self.client.intercept(&mut req);
        Ok(req)
    }

    pub async fn send(self) -> Result<Response, Error> {
        let client = self.client.clone();
        let req = self.build()?;
        client.execute_request(req).await
    }

    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.inner = self.inner.query(query);
        self
    }

    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.inner = self.inner.form(form);
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }

    pub fn header<K, V>(self, key: K, value: V) -> RequestBuilder
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<::http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<::http::Error>,
    {
        Self::new(self.inner.header(key, value), self.client)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn client(base: &str) -> Client {
        Client::new(Url::parse(base).unwrap(), Duration::from_secs(3)).unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let cli = client("http://localhost:5000");
        assert_eq!(
            cli.endpoint(&["sessions", "submit"]).unwrap().as_str(),
            "http://localhost:5000/sessions/submit"
        );

        let cli = client("https://interview.example.com/api");
        assert_eq!(
            cli.endpoint(&["questions", "42"]).unwrap().as_str(),
            "https://interview.example.com/api/questions/42"
        );
    }

    #[test]
    fn cannot_be_a_base_is_rejected() {
        let res = Client::new(
            Url::parse("mailto:someone@example.com").unwrap(),
            Duration::from_secs(1),
        );
        assert!(matches!(res, Err(error::Error::CannotBeABase(_))));
    }

    #[test]
    fn interceptor_attaches_bearer_token() {
        let mut cli = client("http://localhost:5000");

        let req = cli.get(&["questions"]).unwrap().build().unwrap();
        assert!(req.headers().get(header::AUTHORIZATION).is_none());

        cli.set_bearer_token("abc.def.ghi");
        let req = cli.get(&["questions"]).unwrap().build().unwrap();
        assert_eq!(
            req.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer abc.def.ghi"
        );

        cli.clear_bearer_token();
        let req = cli.get(&["questions"]).unwrap().build().unwrap();
        assert!(req.headers().get(header::AUTHORIZATION).is_none());
    }
}
