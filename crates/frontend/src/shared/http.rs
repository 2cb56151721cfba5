//! Thin JSON client over `gloo-net`.
//!
//! Every call attaches the session's bearer token, reads the body as text and
//! hands status + body to [`contracts::shared::api::decode`]. A 401 clears the
//! stored session before the error is returned.

use contracts::shared::api::{decode, decode_required, ApiError};
use contracts::shared::validation::ValidationErrors;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::system::auth::session::browser_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Verb::Get => Request::get(url),
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// Request path plus an encoded query string
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query)
        .map_err(|e| ApiError::Decode(format!("Failed to encode query: {}", e)))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))
}

/// Whether the bearer token is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

/// Sends one request and returns `(status, body)`
async fn send(
    verb: Verb,
    path: &str,
    body: Option<String>,
    auth: Auth,
) -> Result<(u16, String), ApiError> {
    let url = api_url(path);
    let session = browser_session();

    let mut builder = verb.builder(&url).header("Accept", "application/json");
    if auth == Auth::Bearer {
        if let Some(token) = session.token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
    }

    let response = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json)
            .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

    if status == 401 && auth == Auth::Bearer {
        log::warn!("{} {} -> 401, clearing session", verb.as_str(), path);
        session.clear();
    } else if !(200..300).contains(&status) {
        log::warn!("{} {} -> {}", verb.as_str(), path, status);
    }

    Ok((status, text))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let (status, text) = send(Verb::Get, path, None, Auth::Bearer).await?;
    decode_required(status, &text)
}

pub async fn get_query<Q: Serialize, T: DeserializeOwned>(
    path: &str,
    query: &Q,
) -> Result<T, ApiError> {
    get(&with_query(path, query)?).await
}

/// Writes may answer with the stored record or with no data at all
pub async fn post<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<Option<T>, ApiError> {
    let (status, text) = send(Verb::Post, path, Some(encode_body(body)?), Auth::Bearer).await?;
    decode(status, &text)
}

pub async fn put<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<Option<T>, ApiError> {
    let (status, text) = send(Verb::Put, path, Some(encode_body(body)?), Auth::Bearer).await?;
    decode(status, &text)
}

/// POST where only success matters
pub async fn post_unit<B: Serialize>(path: &str, body: Option<&B>) -> Result<(), ApiError> {
    let body = body.map(encode_body).transpose()?;
    let (status, text) = send(Verb::Post, path, body, Auth::Bearer).await?;
    decode::<serde_json::Value>(status, &text).map(|_| ())
}

/// PUT where only success matters
pub async fn put_unit<B: Serialize>(path: &str, body: Option<&B>) -> Result<(), ApiError> {
    let body = body.map(encode_body).transpose()?;
    let (status, text) = send(Verb::Put, path, body, Auth::Bearer).await?;
    decode::<serde_json::Value>(status, &text).map(|_| ())
}

/// POST without the bearer token (sign-in endpoints)
pub async fn post_public<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<Option<T>, ApiError> {
    let (status, text) = send(Verb::Post, path, Some(encode_body(body)?), Auth::Public).await?;
    match decode(status, &text) {
        // no session involved: 401 means the credentials were wrong
        Err(ApiError::Unauthorized) => Err(ApiError::Rejected {
            status,
            message: "Invalid phone number or code".to_string(),
            field_errors: ValidationErrors::new(),
        }),
        other => other,
    }
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let (status, text) = send(Verb::Delete, path, None, Auth::Bearer).await?;
    decode::<serde_json::Value>(status, &text).map(|_| ())
}
