// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Status inválido: '{0}'")]
    InvalidStatus(String),

    #[error("Endpoint não encontrado: '{0}'")]
    EndpointNotFound(String),

    #[error("Agendamento não encontrado")]
    BookingNotFound,

    // Corpo ilegível, Content-Type ausente, etc.
    #[error("Corpo da requisição inválido: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    PathRejection(#[from] PathRejection),

    // Falha do banco: a mensagem vai para o cliente junto com o 500
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            AppError::EndpointNotFound(_) | AppError::BookingNotFound => StatusCode::NOT_FOUND,
            AppError::JsonRejection(rejection) => rejection.status(),
            AppError::PathRejection(rejection) => rejection.status(),
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::InvalidStatus(ref value) => json!({
                "error": format!(
                    "Status '{}' inválido. Use: pending, in-progress, completed ou cancelled.",
                    value
                ),
            }),
            AppError::EndpointNotFound(_) => json!({ "error": "Endpoint não encontrado." }),
            AppError::BookingNotFound => json!({ "error": "Agendamento não encontrado." }),
            AppError::JsonRejection(rejection) => json!({ "error": rejection.body_text() }),
            AppError::PathRejection(rejection) => json!({ "error": rejection.body_text() }),
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "error": e.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
