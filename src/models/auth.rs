//! Modelos de autenticação e status do motorista

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::motorista::{Motorista, StatusDisponibilidade};

/// Request de login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Response de login
///
/// Backends antigos devolvem o registro em `usuario`; os atuais em
/// `motorista`. Os dois nomes são aceitos no mesmo campo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "usuario")]
    pub motorista: Option<Motorista>,
}

/// Request de cadastro, já normalizado
///
/// A validação roda depois da normalização: CPF apenas dígitos, email e
/// usuário em minúsculas.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100))]
    pub nome: String,
    #[validate(length(min = 3, max = 50))]
    pub usuario: String,
    #[validate(custom = "crate::utils::validation::validar_cpf")]
    pub cpf: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub senha: String,
}

/// Response de cadastro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope do perfil do motorista
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotoristaResponse {
    pub success: bool,
    #[serde(default, alias = "usuario")]
    pub motorista: Option<Motorista>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Corpo da atualização de status de disponibilidade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtualizarStatusRequest {
    pub status_disponibilidade: StatusDisponibilidade,
}

/// Resposta da atualização de status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Corpo da atualização da foto de perfil no banco
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtualizarImagemRequest {
    pub imagem_url: String,
}

/// Resposta do upload de foto
///
/// Diferente do cliente JSON, o upload interpreta o corpo também nas
/// respostas de erro; `success` ausente conta como falha.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
