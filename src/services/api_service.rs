//! Cliente HTTP base da API
//!
//! Este módulo monta e executa as requisições contra a URL base
//! configurada e normaliza o tratamento de erros. Toda chamada é única:
//! não há retry, backoff nem deduplicação; quem repete é o usuário.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{ApiError, ApiResult};

/// Cliente base das requisições HTTP
///
/// Carrega um `CancellationToken` próprio: uma tela cria um escopo com
/// [`ApiService::scoped`] e, ao ser descartada, cancela o token para
/// abortar as chamadas em voo.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
    cancel: CancellationToken,
}

impl ApiService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Falha ao criar cliente HTTP");

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cancel: CancellationToken::new(),
        }
    }

    /// URL base configurada, sem barra final
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Derivar um cliente para o escopo de uma tela
    ///
    /// Cancelar o escopo filho não afeta o cliente raiz; cancelar o raiz
    /// derruba todos os escopos.
    pub fn scoped(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            cancel: self.cancel.child_token(),
        }
    }

    /// Abortar as requisições em voo deste escopo
    pub fn cancelar(&self) {
        self.cancel.cancel();
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    /// Executar uma requisição e interpretar a resposta
    ///
    /// O corpo é sempre interpretado como JSON. Status fora da faixa de
    /// sucesso vira `ApiError::Http` com a mensagem do campo `error` do
    /// corpo, ou `"Erro HTTP: <status>"` quando o campo não existe.
    pub async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::info!("🔗 Fazendo requisição para: {} {}", method, url);

        let mut requisicao = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            requisicao = requisicao.json(body);
        }

        let executar = async {
            let resposta = requisicao.send().await.map_err(ApiError::from_reqwest)?;
            let status = resposta.status();
            log::info!("📥 Status da resposta: {}", status);

            let texto = resposta.text().await.map_err(ApiError::from_reqwest)?;
            let dados: serde_json::Value = serde_json::from_str(&texto)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;

            if !status.is_success() {
                let mensagem = dados
                    .get("error")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Erro HTTP: {}", status.as_u16()));
                log::error!("❌ Erro na requisição: {}", mensagem);
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    message: mensagem,
                });
            }

            serde_json::from_value(dados).map_err(|e| ApiError::Deserialization(e.to_string()))
        };

        tokio::select! {
            _ = self.cancel.cancelled() => {
                log::warn!("🛑 Requisição cancelada: {}", endpoint);
                Err(ApiError::Cancelled)
            }
            resultado = executar => resultado,
        }
    }

    /// Testar a conexão com o servidor
    pub async fn test_connection(&self) -> ApiResult<serde_json::Value> {
        let resposta = self.get("/health").await?;
        log::info!("✅ Conexão com servidor OK!");
        Ok(resposta)
    }
}
