//! Modelos de convite empresa-motorista

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Convite pendente de uma empresa para o motorista
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convite {
    pub id: i64,
    pub nome_empresa: String,
    #[serde(default)]
    pub data_convite: Option<DateTime<Utc>>,
}

/// Envelope da lista de convites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvitesResponse {
    pub success: bool,
    #[serde(default)]
    pub convites: Vec<Convite>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Resposta de aceitar/rejeitar convite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespostaConvite {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Corpo das respostas a convites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespostaConviteRequest {
    #[serde(rename = "motoristaId")]
    pub motorista_id: i64,
}
