use anyhow::Result;
use reqwest::{
    Body, Client, Method, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::collections::BTreeMap;
use url::Url;

/// # Errors
///
/// Will return `Err` if the headers are invalid or the request can not be sent
pub async fn request(
    client: &Client,
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Option<Body>,
) -> Result<Response> {
    let headers = headers
        .iter()
        .map(|(k, v)| Ok((k.parse::<HeaderName>()?, v.parse::<HeaderValue>()?)))
        .collect::<Result<HeaderMap>>()?;

    log::debug!("{method} {url}");

    let request = client.request(method, url).headers(headers);

    let request = if let Some(body) = body {
        request.body(body)
    } else {
        request
    };

    Ok(request.send().await?)
}
