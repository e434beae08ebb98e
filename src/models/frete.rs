//! Modelos de frete
//!
//! O ciclo de vida de um frete (`oferecido → aceito → finalizado`, ou
//! `oferecido → recusado`) pertence ao servidor. O cliente apenas pede
//! transições e reconcilia o estado recarregando as listas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Oferta de frete como chega do backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frete {
    pub id: i64,
    pub codigo_frete: String,
    pub nome_empresa: String,
    pub origem: String,
    pub destino: String,
    pub valor: f64,
    pub tipo_carga: String,
    #[serde(default)]
    pub distancia: Option<f64>,
    #[serde(default)]
    pub peso: Option<f64>,
    #[serde(default)]
    pub eixos_requeridos: Option<i32>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub data_finalizacao: Option<DateTime<Utc>>,
}

/// Envelope das listas de fretes
///
/// `success: false` com status 2xx é falha "suave": o chamador exibe o
/// campo `error` em vez de tratar como exceção.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FretesResponse {
    pub success: bool,
    #[serde(default)]
    pub fretes: Vec<Frete>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope do detalhe de um frete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetalheFreteResponse {
    pub success: bool,
    #[serde(default)]
    pub frete: Option<Frete>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Resposta das transições aceitar/recusar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransicaoFreteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Corpo das transições aceitar/recusar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransicaoFreteRequest {
    #[serde(rename = "motoristaId")]
    pub motorista_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// As três listas do painel do motorista, carregadas juntas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuadroFretes {
    pub oferecidos: Vec<Frete>,
    pub ativos: Vec<Frete>,
    pub historico: Vec<Frete>,
}

impl QuadroFretes {
    /// Há ofertas pendentes de resposta?
    pub fn tem_pendentes(&self) -> bool {
        !self.oferecidos.is_empty()
    }

    /// O motorista tem frete em andamento?
    pub fn em_servico(&self) -> bool {
        !self.ativos.is_empty()
    }
}
