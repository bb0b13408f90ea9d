// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::chain::{ChainError, VerifyError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        match &err {
            ChainError::InvalidAddress(_)
            | ChainError::InvalidAmount(_)
            | ChainError::InvalidTxHash(_) => ApiError::bad_request(err.to_string()),
            ChainError::InsufficientBalance { .. } => ApiError::unprocessable(err.to_string()),
            ChainError::TransactionFailed(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, err.to_string())
            }
            ChainError::WalletUnavailable
            | ChainError::InvalidRpcUrl(_)
            | ChainError::InvalidKey(_)
            | ChainError::Rpc(_)
            | ChainError::Contract(_) => ApiError::service_unavailable(err.to_string()),
        }
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        match &err {
            VerifyError::InvalidTxHash(_) => ApiError::bad_request(err.to_string()),
            VerifyError::ChainUnavailable(_) => ApiError::service_unavailable(err.to_string()),
            VerifyError::ReceiptNotFound
            | VerifyError::TransactionReverted
            | VerifyError::RecipientMismatch { .. }
            | VerifyError::AmountMismatch { .. }
            | VerifyError::InsufficientConfirmations { .. } => {
                ApiError::unprocessable(format!("payment verification failed: {err}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
