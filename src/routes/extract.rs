use axum::extract::{FromRequest, FromRequestParts};

use crate::domain::CampAPIError;

/// `axum::Json` whose rejections are answered with the usual error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CampAPIError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejections are answered with the usual error
/// body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CampAPIError))]
pub struct AppQuery<T>(pub T);
