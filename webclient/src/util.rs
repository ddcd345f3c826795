use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Rejects any non-2xx response. 401/403 are reported as [`Error::NeedLogin`].
pub fn ensure_success(resp: Response) -> Result<Response> {
    let got = resp.status();
    if got.is_success() {
        return Ok(resp);
    }
    let requested_url = resp.url().to_string();
    match got {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::NeedLogin { requested_url }),
        _ => Err(Error::UnexpectedResponseCode { got, requested_url }),
    }
}

pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let resp = self::ensure_success(resp)?;
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
