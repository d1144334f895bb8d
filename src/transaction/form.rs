//! Reads the JSON body shared by the create and edit endpoints.

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::{
    Error,
    transaction::{NewTransaction, validate_transaction_body},
};

/// Turn the extracted JSON body into a validated [NewTransaction].
///
/// Bodies that are not JSON, or sent without a JSON content type, are reported
/// as [Error::InvalidJson] rather than axum's default plain text rejection, so
/// body errors have the same `{"error": ...}` shape as validation errors.
/// Path and method errors are left to axum's defaults.
pub(crate) fn parse_transaction_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<NewTransaction, Error> {
    let Json(body) = body.map_err(|rejection| Error::InvalidJson(rejection.body_text()))?;

    validate_transaction_body(&body)
}
