//! Configuração de variáveis de ambiente
//!
//! Este módulo centraliza a configuração do cliente: URL base da API,
//! URL do serviço de upload e timeout das requisições.

use std::env;

/// URL de produção usada quando `API_BASE_URL` não está definida
const API_BASE_URL_PADRAO: &str = "https://backend-production-5141.up.railway.app";

/// Timeout padrão das requisições, em segundos
const TIMEOUT_PADRAO_SEGUNDOS: u64 = 10;

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub upload_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| API_BASE_URL_PADRAO.to_string());

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            // O serviço de upload roda no mesmo backend por padrão
            upload_base_url: env::var("UPLOAD_BASE_URL").unwrap_or_else(|_| api_base_url.clone()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(TIMEOUT_PADRAO_SEGUNDOS),
            api_base_url,
        }
    }
}

impl EnvironmentConfig {
    /// Verificar se estamos em modo desenvolvimento
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar se estamos em modo produção
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modo_ambiente() {
        let config = EnvironmentConfig {
            environment: "production".to_string(),
            api_base_url: API_BASE_URL_PADRAO.to_string(),
            upload_base_url: API_BASE_URL_PADRAO.to_string(),
            request_timeout_secs: TIMEOUT_PADRAO_SEGUNDOS,
        };
        assert!(config.is_production());
        assert!(!config.is_development());
    }
}
