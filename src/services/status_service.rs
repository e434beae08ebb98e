//! Status de disponibilidade do motorista
//!
//! Só o servidor coloca um motorista em `em-frete` (implicitamente, ao
//! aceitar um frete) e só a finalização do frete o tira de lá. As duas
//! pontas são bloqueadas aqui localmente, antes de qualquer chamada de
//! rede, além da checagem do servidor.

use std::sync::Arc;

use crate::models::auth::{AtualizarStatusRequest, StatusResponse};
use crate::models::motorista::StatusDisponibilidade;
use crate::services::api_service::ApiService;
use crate::session::SessionStore;
use crate::utils::errors::{domain_error, ApiError, ApiResult};

pub struct StatusService {
    api: Arc<ApiService>,
    sessao: SessionStore,
}

impl StatusService {
    pub fn new(api: Arc<ApiService>, sessao: SessionStore) -> Self {
        Self { api, sessao }
    }

    /// Atualizar o status de disponibilidade do motorista da sessão
    ///
    /// Em caso de sucesso o registro da sessão é substituído já com o
    /// status novo.
    pub async fn atualizar(
        &self,
        novo_status: StatusDisponibilidade,
    ) -> ApiResult<StatusDisponibilidade> {
        let motorista = self
            .sessao
            .current()
            .await
            .ok_or_else(|| ApiError::Domain("Nenhum motorista autenticado".to_string()))?;
        let atual = motorista.status_disponibilidade;

        // Guardas locais: nunca pedir `em-frete` e nunca sair dele
        if novo_status == StatusDisponibilidade::EmFrete
            || atual == StatusDisponibilidade::EmFrete
        {
            return Err(ApiError::InvalidStatusTransition {
                de: atual,
                para: novo_status,
            });
        }

        log::info!("🔄 Alterando status de {} para {}", atual, novo_status);

        let corpo = AtualizarStatusRequest {
            status_disponibilidade: novo_status,
        };
        let resposta: StatusResponse = self
            .api
            .put(&format!("/api/auth/motorista/{}/status", motorista.id), &corpo)
            .await?;

        if !resposta.success {
            return Err(domain_error(resposta.error, "Erro ao atualizar status"));
        }

        let mut atualizado = motorista;
        atualizado.status_disponibilidade = novo_status;
        self.sessao.replace(atualizado).await;
        Ok(novo_status)
    }

    /// Alternar entre `livre` e `indisponivel` (o botão do painel)
    pub async fn alternar(&self) -> ApiResult<StatusDisponibilidade> {
        let atual = self
            .sessao
            .current()
            .await
            .ok_or_else(|| ApiError::Domain("Nenhum motorista autenticado".to_string()))?
            .status_disponibilidade;

        let novo_status = match atual {
            StatusDisponibilidade::Livre => StatusDisponibilidade::Indisponivel,
            StatusDisponibilidade::Indisponivel => StatusDisponibilidade::Livre,
            StatusDisponibilidade::EmFrete => {
                return Err(ApiError::InvalidStatusTransition {
                    de: atual,
                    para: StatusDisponibilidade::Livre,
                })
            }
        };
        self.atualizar(novo_status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::models::motorista::Motorista;

    async fn servico_com_status(status: StatusDisponibilidade) -> StatusService {
        // URL inalcançável: qualquer chamada de rede viraria ApiError::Network,
        // então receber InvalidStatusTransition prova que nada foi enviado
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            api_base_url: "http://127.0.0.1:1".to_string(),
            upload_base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
        };
        let api = Arc::new(ApiService::new(&config));
        let sessao = SessionStore::new();
        let servico = StatusService::new(api, sessao.clone());

        let motorista = Motorista {
            id: 1,
            nome: "Teste".to_string(),
            usuario: "teste".to_string(),
            cpf: "11122233344".to_string(),
            email: "teste@email.com".to_string(),
            imagem_url: None,
            codigo: None,
            empresa_id: None,
            status_disponibilidade: status,
        };
        sessao.replace(motorista).await;
        servico
    }

    #[tokio::test]
    async fn test_pedir_em_frete_e_bloqueado_sem_rede() {
        let servico = servico_com_status(StatusDisponibilidade::Livre).await;
        let resultado = servico.atualizar(StatusDisponibilidade::EmFrete).await;
        assert!(matches!(
            resultado,
            Err(ApiError::InvalidStatusTransition {
                de: StatusDisponibilidade::Livre,
                para: StatusDisponibilidade::EmFrete,
            })
        ));
    }

    #[tokio::test]
    async fn test_sair_de_em_frete_e_bloqueado() {
        let servico = servico_com_status(StatusDisponibilidade::EmFrete).await;
        let resultado = servico.atualizar(StatusDisponibilidade::Livre).await;
        assert!(matches!(
            resultado,
            Err(ApiError::InvalidStatusTransition { .. })
        ));

        let resultado = servico.alternar().await;
        assert!(matches!(
            resultado,
            Err(ApiError::InvalidStatusTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_sem_sessao_e_erro_de_dominio() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            api_base_url: "http://127.0.0.1:1".to_string(),
            upload_base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
        };
        let servico = StatusService::new(
            Arc::new(ApiService::new(&config)),
            SessionStore::new(),
        );
        let resultado = servico.atualizar(StatusDisponibilidade::Livre).await;
        assert!(matches!(resultado, Err(ApiError::Domain(_))));
    }
}
