//! JSON body extractor that reports failures as `ServerError`

use axum::extract::FromRequest;

use crate::error::ServerError;

/// Like `axum::Json`, but a bad body becomes a 400 with the API's error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
