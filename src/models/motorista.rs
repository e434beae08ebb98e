//! Modelo do motorista e status de disponibilidade

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status de disponibilidade do motorista
///
/// `em-frete` é atribuído exclusivamente pelo servidor quando um frete é
/// aceito; o cliente nunca solicita essa transição. O status volta a
/// `livre` quando o frete é finalizado.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusDisponibilidade {
    #[default]
    Livre,
    Indisponivel,
    EmFrete,
}

impl StatusDisponibilidade {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusDisponibilidade::Livre => "livre",
            StatusDisponibilidade::Indisponivel => "indisponivel",
            StatusDisponibilidade::EmFrete => "em-frete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "livre" => Some(StatusDisponibilidade::Livre),
            "indisponivel" => Some(StatusDisponibilidade::Indisponivel),
            "em-frete" => Some(StatusDisponibilidade::EmFrete),
            _ => None,
        }
    }

    /// Rótulo apresentado ao motorista
    pub fn descricao(&self) -> &'static str {
        match self {
            StatusDisponibilidade::Livre => "Disponível",
            StatusDisponibilidade::Indisponivel => "Indisponível",
            StatusDisponibilidade::EmFrete => "Em Serviço",
        }
    }
}

impl fmt::Display for StatusDisponibilidade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dados do motorista autenticado
///
/// O hash da senha nunca chega ao cliente. O registro inteiro é
/// substituído a cada login ou atualização de perfil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motorista {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub cpf: String,
    pub email: String,
    #[serde(default)]
    pub imagem_url: Option<String>,
    /// Código de agregação exibido no perfil
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub empresa_id: Option<i64>,
    #[serde(default)]
    pub status_disponibilidade: StatusDisponibilidade,
}

impl Motorista {
    /// O motorista está vinculado a alguma empresa?
    pub fn agregado(&self) -> bool {
        self.empresa_id.is_some()
    }
}
