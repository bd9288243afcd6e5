//! Service traits grouping the Central Dogma APIs.
pub mod content;
pub mod project;
pub mod repository;
pub mod watch;

use reqwest::{Body, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorMessage {
    message: String,
}

/// convert HTTP Response with status < 200 and > 300 to Error
pub(crate) async fn status_unwrap(resp: Response) -> Result<Response, Error> {
    match resp.status().as_u16() {
        code if !(200..300).contains(&code) => {
            let err_body = resp.text().await?;
            let err_msg: ErrorMessage =
                serde_json::from_str(&err_body).unwrap_or(ErrorMessage { message: err_body });
            log::debug!("Error response: [{}] {}", code, err_msg.message);

            Err(Error::ErrorResponse(code, err_msg.message))
        }
        _ => Ok(resp),
    }
}

/// Decodes the JSON body of a successful response.
pub(crate) async fn json_response<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = status_unwrap(resp).await?.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
}

/// Like [`json_response`], but an empty or `204 No Content` response is an empty list.
pub(crate) async fn list_response<T: DeserializeOwned>(resp: Response) -> Result<Vec<T>, Error> {
    let ok_resp = status_unwrap(resp).await?;
    if ok_resp.status() == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }

    let body = ok_resp.bytes().await?;
    if body.is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Decodes a list of `{"name": ..}` records, as returned for removed projects
/// and repositories, into the bare names.
pub(crate) async fn name_list_response(resp: Response) -> Result<Vec<String>, Error> {
    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    let named: Vec<Named> = list_response(resp).await?;

    Ok(named.into_iter().map(|n| n.name).collect())
}

pub(crate) fn json_body<T: Serialize>(value: &T) -> Result<Body, Error> {
    Ok(Body::from(serde_json::to_vec(value)?))
}
