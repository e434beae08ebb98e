//! Convites empresa-motorista
//!
//! Listagem e resposta aos convites de agregação. Aceitar um convite
//! muda `empresa_id` do motorista no servidor; o cliente observa a
//! mudança recarregando o perfil (`AuthService::buscar_dados`) ou no
//! próximo login.

use std::sync::Arc;

use crate::models::convite::{ConvitesResponse, RespostaConvite, RespostaConviteRequest};
use crate::services::api_service::ApiService;
use crate::sync::sequencer::RequestSequencer;
use crate::utils::errors::{domain_error, ApiResult};

pub struct ConviteService {
    api: Arc<ApiService>,
    seq_convites: RequestSequencer,
}

impl ConviteService {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            seq_convites: RequestSequencer::new(),
        }
    }

    /// Convites pendentes do motorista
    ///
    /// `None` sinaliza resposta obsoleta descartada pelo sequenciador.
    pub async fn buscar(&self, motorista_id: i64) -> ApiResult<Option<ConvitesResponse>> {
        let ticket = self.seq_convites.issue();
        let resposta: ConvitesResponse = self
            .api
            .get(&format!("/api/auth/motorista/{}/convites", motorista_id))
            .await?;

        if !self.seq_convites.try_commit(ticket) {
            log::warn!("⏭️ Resposta obsoleta de convites descartada");
            return Ok(None);
        }
        Ok(Some(resposta))
    }

    /// Aceitar um convite de agregação
    pub async fn aceitar(&self, convite_id: i64, motorista_id: i64) -> ApiResult<RespostaConvite> {
        self.responder(convite_id, motorista_id, "aceitar").await
    }

    /// Rejeitar um convite (estado terminal)
    pub async fn rejeitar(&self, convite_id: i64, motorista_id: i64) -> ApiResult<RespostaConvite> {
        self.responder(convite_id, motorista_id, "rejeitar").await
    }

    async fn responder(
        &self,
        convite_id: i64,
        motorista_id: i64,
        acao: &str,
    ) -> ApiResult<RespostaConvite> {
        log::info!("📨 Respondendo convite {}: {}", convite_id, acao);

        let corpo = RespostaConviteRequest { motorista_id };
        let resposta: RespostaConvite = self
            .api
            .put(&format!("/api/auth/convites/{}/{}", convite_id, acao), &corpo)
            .await?;

        if !resposta.success {
            return Err(domain_error(resposta.error, "Erro ao responder convite"));
        }
        Ok(resposta)
    }
}
