//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, NewAccount, PersonName, Transfer, ValidationError};
use crate::error::{AppError, AppResult};
use crate::storage::SharedStorage;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl AccountCreateRequest {
    /// Check both names and build the account to persist
    pub fn validate(self) -> Result<NewAccount, ValidationError> {
        let first_name = PersonName::parse("firstName", self.first_name)?;
        let last_name = PersonName::parse("lastName", self.last_name)?;
        Ok(NewAccount::new(first_name, last_name))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(default)]
    pub from_id: Option<i64>,
    #[serde(default)]
    pub to_id: Option<i64>,
    #[serde(default)]
    pub amount: Option<i64>,
}

impl TransferRequest {
    pub fn validate(self) -> Result<Transfer, ValidationError> {
        let from_id = self.from_id.ok_or(ValidationError::Required("fromId"))?;
        let to_id = self.to_id.ok_or(ValidationError::Required("toId"))?;
        let amount = self.amount.ok_or(ValidationError::Required("amount"))?;
        Transfer::new(from_id, to_id, amount)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<SharedStorage> {
    Router::new()
        .route(
            "/accounts",
            get(list_accounts)
                .post(create_account)
                .delete(delete_account_without_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/accounts/:id",
            get(get_account)
                .delete(delete_account)
                .fallback(method_not_allowed),
        )
        .route("/transfer", post(transfer).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .fallback(not_found)
}

/// Parse a base-10 account id taken from the path
pub fn parse_account_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|e| AppError::InvalidId(format!("{raw:?} ({e})")))
}

// =========================================================================
// /accounts
// =========================================================================

async fn list_accounts(State(storage): State<SharedStorage>) -> AppResult<Json<AccountsResponse>> {
    let accounts = storage
        .get_accounts()
        .await
        .map_err(|e| AppError::from_storage("get accounts", e))?;

    Ok(Json(AccountsResponse { accounts }))
}

async fn create_account(
    State(storage): State<SharedStorage>,
    payload: Result<Json<AccountCreateRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let Json(request) = payload?;
    let new_account = request.validate()?;

    let account = storage
        .create_account(&new_account)
        .await
        .map_err(|e| AppError::from_storage("create account", e))?;

    tracing::info!(account_id = account.id, number = account.number, "account created");
    Ok((StatusCode::CREATED, Json(account)))
}

/// DELETE without an id in the path
async fn delete_account_without_id() -> AppError {
    AppError::MissingId
}

// =========================================================================
// /accounts/:id
// =========================================================================

async fn get_account(
    State(storage): State<SharedStorage>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let id = parse_account_id(&id)?;

    let account = storage
        .get_account_by_id(id)
        .await
        .map_err(|e| AppError::from_storage("get account", e))?;

    Ok(Json(account))
}

async fn delete_account(
    State(storage): State<SharedStorage>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let id = parse_account_id(&id)?;

    storage
        .delete_account(id)
        .await
        .map_err(|e| AppError::from_storage("delete account", e))?;

    Ok(Json(StatusResponse::new("deleted")))
}

// =========================================================================
// /transfer
// =========================================================================

async fn transfer(
    State(storage): State<SharedStorage>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(request) = payload?;
    let transfer = request.validate()?;

    storage
        .transfer(&transfer)
        .await
        .map_err(|e| AppError::from_storage("complete transfer", e))?;

    Ok(Json(StatusResponse::new("transferred successfully")))
}

// =========================================================================
// Misc
// =========================================================================

async fn health_check() -> &'static str {
    "OK"
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_create_request_deserialize() {
        let json = r#"{"firstName": "Ann", "lastName": "Lee"}"#;

        let request: AccountCreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "Ann");
        assert_eq!(request.last_name, "Lee");
    }

    #[test]
    fn test_missing_name_is_required_error() {
        let request: AccountCreateRequest = serde_json::from_str(r#"{"firstName": "Ann"}"#).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::Required("lastName")
        );
    }

    #[test]
    fn test_transfer_request_validate() {
        let request: TransferRequest =
            serde_json::from_str(r#"{"fromId": 1, "toId": 2, "amount": 300}"#).unwrap();
        let transfer = request.validate().unwrap();
        assert_eq!(transfer.from_id(), 1);
        assert_eq!(transfer.to_id(), 2);
        assert_eq!(transfer.amount(), 300);
    }

    #[test]
    fn test_transfer_request_missing_field() {
        let request: TransferRequest = serde_json::from_str(r#"{"fromId": 1, "amount": 5}"#).unwrap();
        assert_eq!(request.validate().unwrap_err(), ValidationError::Required("toId"));
    }

    #[test]
    fn test_parse_account_id() {
        assert_eq!(parse_account_id("42").unwrap(), 42);
        assert!(matches!(parse_account_id("abc"), Err(AppError::InvalidId(_))));
        assert!(matches!(parse_account_id("1.5"), Err(AppError::InvalidId(_))));
        assert!(matches!(parse_account_id(""), Err(AppError::InvalidId(_))));
    }
}
