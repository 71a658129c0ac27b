//! # Generic Client
//!
//! [`ResourceClient<T>`] performs the CRUD contract against the remote
//! collection of `T`: count, create, read (all, single, by key), update,
//! delete and validate. Network mechanics are delegated to an
//! [`HttpTransport`]; the client builds paths, (de)serialises payloads and
//! turns responses into result values.
//!
//! ## Paths
//!
//! | Operation | Request |
//! |-----------|---------|
//! | count | `GET {type}/Count` |
//! | create | `POST {type}` |
//! | get_all | `GET {type}/All` |
//! | get_single | `GET {type}/Single` |
//! | get_single_by_key | `GET {type}/Single/{key}` |
//! | update | `PUT {type}` |
//! | delete | `DELETE {type}/{key}` |
//! | validate | `POST {type}/Validate` |
//!
//! ## Cancellation
//!
//! A client made with [`with_cancellation`](ResourceClient::with_cancellation)
//! aborts its pending call as soon as the token fires and returns
//! [`ClientError::Cancelled`]. Anything already sent is not rolled back.

use crate::framework::{ClientError, HttpTransport, Resource, TransportError, TransportRequest, TransportResponse};
use crate::model::{Key, PagedList};
use crate::query::{QueryDefinition, Queryable};
use crate::result::{OperationResult, ServerSideValidationError, ServerSideValidationResult};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type Sent = Result<TransportResponse, TransportError>;

/// A typed client for one remote resource collection.
///
/// Cheap to clone: it holds the shared transport and an optional
/// cancellation token.
pub struct ResourceClient<T> {
    transport: Arc<dyn HttpTransport>,
    cancel: Option<CancellationToken>,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cancel: self.cancel.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            cancel: None,
            _resource: PhantomData,
        }
    }

    /// Returns a client whose calls observe `token`.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cancel: Some(token),
            _resource: PhantomData,
        }
    }

    pub fn resource_name(&self) -> &'static str {
        T::resource_name()
    }

    /// Total size of the collection.
    ///
    /// Best effort: no content, a non-200 status, an unreadable body or a
    /// transport failure all count as `0`.
    pub async fn count(&self) -> Result<u64, ClientError> {
        let path = self.path(&["Count"]);
        let response = match self.dispatch(TransportRequest::get(&path)).await? {
            Ok(response) => response,
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "Count failed");
                return Ok(0);
            }
        };
        if response.status != StatusCode::OK {
            debug!(resource = T::resource_name(), status = %response.status, "Count without content");
            return Ok(0);
        }
        let count = response.body.as_deref().and_then(parse_count).unwrap_or(0);
        debug!(resource = T::resource_name(), count, "Count");
        Ok(count)
    }

    /// Sends `item` for creation.
    ///
    /// On a 2xx with a body the result carries the server's copy, which may
    /// hold a newly assigned key.
    pub async fn create(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        let body = to_body(item)?;
        let path = self.path(&[]);
        let sent = self.dispatch(TransportRequest::post(path, body)).await?;
        let result = self.write_result(sent);
        info!(resource = T::resource_name(), status = %result.status_code, "Created");
        Ok(result)
    }

    /// Fetches the whole collection.
    ///
    /// A 204 or an empty 200 yields an empty list. `None` signals a transport
    /// failure, an unreadable body or a non-success status.
    pub async fn get_all(&self) -> Result<Option<Vec<T>>, ClientError> {
        self.fetch_collection(&["All"]).await
    }

    /// Fetches one record without a key, as chosen by the server.
    pub async fn get_single(&self) -> Result<Option<T>, ClientError> {
        let path = self.path(&["Single"]);
        let sent = self.dispatch(TransportRequest::get(path)).await?;
        Ok(self.read_single(sent))
    }

    /// Fetches the record addressed by `key`.
    ///
    /// # Errors
    /// [`ClientError::InvalidArgument`] for a blank key, before any request.
    pub async fn get_single_by_key(&self, key: &Key) -> Result<Option<T>, ClientError> {
        let segment = key_segment(key)?;
        let path = self.path(&["Single", &segment]);
        let sent = self.dispatch(TransportRequest::get(path)).await?;
        Ok(self.read_single(sent))
    }

    /// Replaces the remote record addressed by `item`'s key.
    ///
    /// # Errors
    /// [`ClientError::InvalidArgument`] when the key is blank.
    pub async fn update(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        key_segment(item.key())?;
        let body = to_body(item)?;
        let path = self.path(&[]);
        let sent = self.dispatch(TransportRequest::put(path, body)).await?;
        let result = self.write_result(sent);
        info!(resource = T::resource_name(), key = %item.key(), status = %result.status_code, "Updated");
        Ok(result)
    }

    /// Deletes the remote record addressed by `item`'s key. The result never
    /// carries an object.
    ///
    /// # Errors
    /// [`ClientError::InvalidArgument`] when the key is blank.
    pub async fn delete(&self, item: &T) -> Result<OperationResult<T>, ClientError> {
        let segment = key_segment(item.key())?;
        let path = self.path(&[&segment]);
        let status = match self.dispatch(TransportRequest::delete(path)).await? {
            Ok(response) => response.status,
            Err(e) => {
                warn!(resource = T::resource_name(), key = %item.key(), error = %e, "Delete failed");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        info!(resource = T::resource_name(), key = %item.key(), %status, "Deleted");
        Ok(OperationResult::status_only(status))
    }

    /// Asks the server to validate `item` without persisting it.
    ///
    /// A 204 means no violations. `None` for any other failure.
    pub async fn validate(&self, item: &T) -> Result<Option<ServerSideValidationResult>, ClientError> {
        let body = to_body(item)?;
        let path = self.path(&["Validate"]);
        let response = match self.dispatch(TransportRequest::post(path, body)).await? {
            Ok(response) => response,
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "Validate failed");
                return Ok(None);
            }
        };
        let status = response.status;
        if status == StatusCode::NO_CONTENT {
            return Ok(Some(ServerSideValidationResult::new()));
        }
        if status != StatusCode::OK {
            debug!(resource = T::resource_name(), %status, "Validate rejected");
            return Ok(None);
        }
        Ok(match response.body.as_deref() {
            Some(body) => parse_validation(body),
            None => Some(ServerSideValidationResult::new()),
        })
    }

    /// Fetches the collection and applies `query` locally.
    ///
    /// `None` when the collection could not be fetched.
    ///
    /// # Errors
    /// [`ClientError::Query`] when the query does not compile against `T`;
    /// this is checked before any request.
    pub async fn query(&self, query: &QueryDefinition) -> Result<Option<PagedList<T>>, ClientError>
    where
        T: Queryable,
    {
        let compiled = query.compile::<T>()?;
        let all = self.get_all().await?;
        Ok(all.map(|items| compiled.apply_paged(items)))
    }

    /// Fetches a list of `V` under `{type}/{segments...}`, with the same
    /// semantics as [`get_all`](Self::get_all).
    pub(crate) async fn fetch_collection<V: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<Vec<V>>, ClientError> {
        let path = self.path(segments);
        let response = match self.dispatch(TransportRequest::get(&path)).await? {
            Ok(response) => response,
            Err(e) => {
                warn!(resource = T::resource_name(), %path, error = %e, "Fetch failed");
                return Ok(None);
            }
        };
        let status = response.status;
        if status == StatusCode::NO_CONTENT {
            return Ok(Some(Vec::new()));
        }
        if status != StatusCode::OK {
            debug!(resource = T::resource_name(), %path, %status, "Fetch rejected");
            return Ok(None);
        }
        let items = match response.body.as_deref() {
            None => Some(Vec::new()),
            Some(body) => match serde_json::from_str::<Vec<V>>(body) {
                Ok(items) => Some(items),
                Err(e) => {
                    warn!(resource = T::resource_name(), %path, error = %e, "Unreadable collection");
                    None
                }
            },
        };
        debug!(resource = T::resource_name(), %path, found = ?items.as_ref().map(Vec::len), "Fetched");
        Ok(items)
    }

    fn path(&self, segments: &[&str]) -> String {
        let mut path = T::resource_name().to_string();
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    async fn dispatch(&self, request: TransportRequest) -> Result<Sent, ClientError> {
        debug!(method = %request.method, path = %request.path, "Dispatch");
        let send = self.transport.send(request);
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!(resource = T::resource_name(), "Cancelled");
                    Err(ClientError::Cancelled)
                }
                sent = send => Ok(sent),
            },
            None => Ok(send.await),
        }
    }

    fn read_single(&self, sent: Sent) -> Option<T> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "Get failed");
                return None;
            }
        };
        if response.status != StatusCode::OK {
            debug!(resource = T::resource_name(), status = %response.status, "Get without record");
            return None;
        }
        let body = response.body?;
        match serde_json::from_str::<T>(&body) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "Unreadable record");
                None
            }
        }
    }

    fn write_result(&self, sent: Sent) -> OperationResult<T> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "Write failed");
                return OperationResult::status_only(StatusCode::SERVICE_UNAVAILABLE);
            }
        };
        match response.body {
            Some(body) if response.status.is_success() && response.status != StatusCode::NO_CONTENT => {
                match serde_json::from_str::<T>(&body) {
                    Ok(item) => OperationResult::new(response.status, Some(item)),
                    Err(e) => {
                        warn!(resource = T::resource_name(), status = %response.status, error = %e, "Unreadable record");
                        OperationResult::status_only(StatusCode::BAD_GATEWAY)
                    }
                }
            }
            _ => OperationResult::status_only(response.status),
        }
    }
}

fn to_body<T: Resource>(item: &T) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(item).map_err(|e| ClientError::InvalidArgument(e.to_string()))
}

fn key_segment(key: &Key) -> Result<String, ClientError> {
    if key.is_blank() {
        return Err(ClientError::InvalidArgument("key must not be blank".to_string()));
    }
    Ok(urlencoding::encode(&key.as_text()).into_owned())
}

/// Accepts a bare number (`5`) or a quoted one (`"5"`).
fn parse_count(body: &str) -> Option<u64> {
    let body = body.trim();
    body.parse::<u64>().ok().or_else(|| {
        serde_json::from_str::<String>(body)
            .ok()
            .and_then(|text| text.trim().parse::<u64>().ok())
    })
}

/// Accepts either a bare list of errors or an `{ "errors": [...] }` envelope.
fn parse_validation(body: &str) -> Option<ServerSideValidationResult> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<ServerSideValidationError>),
        Envelope(ServerSideValidationResult),
    }

    match serde_json::from_str::<Wire>(body) {
        Ok(Wire::List(errors)) => Some(errors.into()),
        Ok(Wire::Envelope(result)) => Some(result),
        Err(e) => {
            warn!(error = %e, "Unreadable validation result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), Some(5));
        assert_eq!(parse_count(" 12\n"), Some(12));
        assert_eq!(parse_count("\"7\""), Some(7));
        assert_eq!(parse_count("five"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn test_key_segment() {
        assert_eq!(key_segment(&Key::Int(5)).unwrap(), "5");
        assert_eq!(key_segment(&Key::from("a b/c")).unwrap(), "a%20b%2Fc");
        assert!(matches!(
            key_segment(&Key::from(" ")),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_validation_accepts_both_forms() {
        let list = r#"[{"errorMessage":"required","propertyName":"Name"}]"#;
        assert_eq!(parse_validation(list).unwrap().errors().len(), 1);
        let envelope = r#"{"errors":[]}"#;
        assert!(parse_validation(envelope).unwrap().is_success());
        assert!(parse_validation("oops").is_none());
    }
}
