//! Sistema de tratamento de erros
//!
//! Este módulo define todos os tipos de erros do cliente e as mensagens
//! apresentadas ao usuário. Nenhum erro é fatal: toda falha é recuperável
//! repetindo a ação.

use thiserror::Error;

use crate::models::motorista::StatusDisponibilidade;

/// Erros principais do cliente da API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Falha de transporte (DNS, conexão recusada, servidor fora do ar)
    #[error("Erro de conexão: {0}")]
    Network(String),

    #[error("Timeout na requisição. Servidor demorou para responder.")]
    Timeout,

    /// Status HTTP fora da faixa de sucesso, com a mensagem do corpo
    #[error("{message}")]
    Http { status: u16, message: String },

    /// O servidor respondeu `success: false` com um motivo de negócio
    #[error("{0}")]
    Domain(String),

    /// Transição de status bloqueada localmente
    #[error("Não é possível alterar o status de \"{de}\" para \"{para}\"")]
    InvalidStatusTransition {
        de: StatusDisponibilidade,
        para: StatusDisponibilidade,
    },

    #[error("Dados inválidos: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Resposta inválida do servidor: {0}")]
    Deserialization(String),

    #[error("Erro ao ler arquivo: {0}")]
    Io(#[from] std::io::Error),

    /// A tela que originou a chamada foi descartada
    #[error("Requisição cancelada")]
    Cancelled,
}

impl ApiError {
    /// Converter um erro do reqwest na variante apropriada
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Network(
                "Verifique se o servidor está rodando e sua conexão com a internet".to_string(),
            )
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Resultado tipado para operações que podem falhar
pub type ApiResult<T> = Result<T, ApiError>;

/// Helper para criar erros de domínio a partir do campo `error` da resposta
pub fn domain_error(error: Option<String>, fallback: &str) -> ApiError {
    ApiError::Domain(error.unwrap_or_else(|| fallback.to_string()))
}
