//! Ciclo de vida dos fretes
//!
//! Listagem de ofertas, fretes ativos e histórico, mais as transições
//! aceitar/recusar. O servidor é a única fonte de verdade: o cliente
//! nunca calcula o estado de um frete localmente, e toda mutação é
//! seguida da recarga completa das três listas.

use std::sync::Arc;

use crate::models::frete::{
    DetalheFreteResponse, Frete, FretesResponse, QuadroFretes, TransicaoFreteRequest,
    TransicaoFreteResponse,
};
use crate::services::api_service::ApiService;
use crate::sync::sequencer::RequestSequencer;
use crate::utils::errors::{domain_error, ApiResult};

/// Observação enviada quando o motorista recusa sem informar motivo
pub const OBSERVACAO_RECUSA_PADRAO: &str = "Recusado pelo motorista via app";

pub struct FreteService {
    api: Arc<ApiService>,
    seq_oferecidos: RequestSequencer,
    seq_ativos: RequestSequencer,
    seq_historico: RequestSequencer,
}

impl FreteService {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            seq_oferecidos: RequestSequencer::new(),
            seq_ativos: RequestSequencer::new(),
            seq_historico: RequestSequencer::new(),
        }
    }

    /// Fretes oferecidos ao motorista, pendentes de resposta
    ///
    /// `None` significa que uma busca mais recente já foi concluída e
    /// esta resposta deve ser descartada, não renderizada.
    pub async fn buscar_oferecidos(&self, motorista_id: i64) -> ApiResult<Option<FretesResponse>> {
        self.buscar_lista(&self.seq_oferecidos, motorista_id, "oferecidos").await
    }

    /// Fretes aceitos e em andamento
    pub async fn buscar_ativos(&self, motorista_id: i64) -> ApiResult<Option<FretesResponse>> {
        self.buscar_lista(&self.seq_ativos, motorista_id, "ativos").await
    }

    /// Histórico de fretes finalizados
    pub async fn buscar_historico(&self, motorista_id: i64) -> ApiResult<Option<FretesResponse>> {
        self.buscar_lista(&self.seq_historico, motorista_id, "historico").await
    }

    async fn buscar_lista(
        &self,
        sequencer: &RequestSequencer,
        motorista_id: i64,
        lista: &str,
    ) -> ApiResult<Option<FretesResponse>> {
        let ticket = sequencer.issue();
        let resposta: FretesResponse = self
            .api
            .get(&format!("/fretes/motorista/{}/{}", motorista_id, lista))
            .await?;

        if !sequencer.try_commit(ticket) {
            log::warn!("⏭️ Resposta obsoleta de fretes {} descartada", lista);
            return Ok(None);
        }
        Ok(Some(resposta))
    }

    /// Detalhe de um frete específico
    pub async fn buscar_detalhe(&self, frete_id: i64) -> ApiResult<DetalheFreteResponse> {
        self.api.get(&format!("/fretes/{}", frete_id)).await
    }

    /// Carregar as três listas do painel de uma vez
    ///
    /// Falha em uma lista individual vira lista vazia com aviso no log,
    /// como nas telas: o painel continua utilizável com o que chegou.
    pub async fn carregar_todos(&self, motorista_id: i64) -> QuadroFretes {
        log::info!("🚛 Carregando fretes para motorista: {}", motorista_id);

        let (oferecidos, ativos, historico) = futures::future::join3(
            self.buscar_oferecidos(motorista_id),
            self.buscar_ativos(motorista_id),
            self.buscar_historico(motorista_id),
        )
        .await;

        let quadro = QuadroFretes {
            oferecidos: extrair_fretes("oferecidos", oferecidos),
            ativos: extrair_fretes("ativos", ativos),
            historico: extrair_fretes("historico", historico),
        };

        log::info!(
            "✅ Fretes carregados: {} oferecidos, {} ativos, {} no histórico",
            quadro.oferecidos.len(),
            quadro.ativos.len(),
            quadro.historico.len()
        );
        quadro
    }

    /// Aceitar um frete oferecido
    ///
    /// A transição não é idempotente: `success: false` é a rejeição
    /// autoritativa do servidor (por exemplo, frete já aceito por outro
    /// motorista). Em caso de sucesso as três listas são recarregadas e
    /// o quadro novo é retornado; o estado local anterior é descartado.
    pub async fn aceitar(&self, frete_id: i64, motorista_id: i64) -> ApiResult<QuadroFretes> {
        log::info!("✅ Aceitando frete: {}", frete_id);

        let corpo = TransicaoFreteRequest {
            motorista_id,
            observacoes: None,
        };
        let resposta: TransicaoFreteResponse = self
            .api
            .put(&format!("/fretes/{}/aceitar", frete_id), &corpo)
            .await?;

        if !resposta.success {
            return Err(domain_error(resposta.error, "Erro ao aceitar frete"));
        }
        Ok(self.carregar_todos(motorista_id).await)
    }

    /// Recusar um frete oferecido (transição terminal)
    ///
    /// Sem motivo informado, vai a observação padrão do aplicativo.
    pub async fn recusar(
        &self,
        frete_id: i64,
        motorista_id: i64,
        observacoes: Option<String>,
    ) -> ApiResult<QuadroFretes> {
        log::info!("❌ Recusando frete: {}", frete_id);

        let corpo = TransicaoFreteRequest {
            motorista_id,
            observacoes: Some(
                observacoes.unwrap_or_else(|| OBSERVACAO_RECUSA_PADRAO.to_string()),
            ),
        };
        let resposta: TransicaoFreteResponse = self
            .api
            .put(&format!("/fretes/{}/recusar", frete_id), &corpo)
            .await?;

        if !resposta.success {
            return Err(domain_error(resposta.error, "Erro ao recusar frete"));
        }
        Ok(self.carregar_todos(motorista_id).await)
    }

    /// O motorista tem ofertas pendentes de resposta?
    pub async fn tem_pendentes(&self, motorista_id: i64) -> bool {
        match self.buscar_oferecidos(motorista_id).await {
            Ok(Some(resposta)) if resposta.success => !resposta.fretes.is_empty(),
            Ok(_) => false,
            Err(e) => {
                log::error!("❌ Erro ao verificar fretes pendentes: {}", e);
                false
            }
        }
    }

    /// O motorista está com frete em andamento?
    pub async fn em_servico(&self, motorista_id: i64) -> bool {
        match self.buscar_ativos(motorista_id).await {
            Ok(Some(resposta)) if resposta.success => !resposta.fretes.is_empty(),
            Ok(_) => false,
            Err(e) => {
                log::error!("❌ Erro ao verificar status em serviço: {}", e);
                false
            }
        }
    }
}

fn extrair_fretes(lista: &str, resultado: ApiResult<Option<FretesResponse>>) -> Vec<Frete> {
    match resultado {
        Ok(Some(resposta)) if resposta.success => resposta.fretes,
        Ok(Some(resposta)) => {
            log::warn!(
                "⚠️ Falha ao carregar fretes {}: {}",
                lista,
                resposta.error.unwrap_or_else(|| "sem detalhe".to_string())
            );
            Vec::new()
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            log::error!("❌ Erro ao carregar fretes {}: {}", lista, e);
            Vec::new()
        }
    }
}
