//! Upload da foto de perfil
//!
//! O upload é um colaborador à parte do cliente JSON: envia o arquivo
//! em multipart para o serviço de imagens e depois grava a URL retornada
//! no registro do motorista.

use reqwest::multipart;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::{AtualizarImagemRequest, UploadResponse};
use crate::services::api_service::ApiService;
use crate::utils::errors::{domain_error, ApiError, ApiResult};

pub struct UploadService {
    api: Arc<ApiService>,
    client: reqwest::Client,
    upload_base_url: String,
}

impl UploadService {
    pub fn new(config: &EnvironmentConfig, api: Arc<ApiService>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Falha ao criar cliente HTTP");

        Self {
            api,
            client,
            upload_base_url: config.upload_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Enviar a foto e retornar a URL salva no servidor
    pub async fn enviar_foto(&self, caminho: &Path, motorista_id: i64) -> ApiResult<String> {
        let bytes = tokio::fs::read(caminho).await?;
        let nome_arquivo = caminho
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "foto".to_string());
        let mime = mime_da_extensao(caminho);

        log::info!("🖼️ Enviando foto: {} ({} bytes)", nome_arquivo, bytes.len());

        let parte = multipart::Part::bytes(bytes)
            .file_name(nome_arquivo)
            .mime_str(&mime)
            .map_err(|e| ApiError::Domain(format!("Tipo de imagem inválido: {}", e)))?;
        let form = multipart::Form::new()
            .part("image", parte)
            .text("userId", motorista_id.to_string());

        let url = format!("{}/images/upload-foto", self.upload_base_url);
        let resposta = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = resposta.status();
        let dados: UploadResponse = resposta
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: dados
                    .error
                    .unwrap_or_else(|| format!("Erro HTTP: {}", status.as_u16())),
            });
        }
        if !dados.success {
            return Err(domain_error(dados.error, "Erro ao enviar a imagem"));
        }

        dados
            .image_url
            .ok_or_else(|| ApiError::Deserialization("resposta de upload sem imageUrl".to_string()))
    }

    /// Gravar a URL da imagem no registro do motorista
    pub async fn atualizar_imagem(&self, motorista_id: i64, imagem_url: &str) -> ApiResult<()> {
        log::info!("🔄 Atualizando imagem no banco para usuário: {}", motorista_id);

        let corpo = AtualizarImagemRequest {
            imagem_url: imagem_url.to_string(),
        };
        let _: serde_json::Value = self
            .api
            .put(&format!("/usuarios/{}/imagem", motorista_id), &corpo)
            .await?;

        log::info!("✅ Imagem salva no banco!");
        Ok(())
    }

    /// Fluxo completo da tela de perfil: upload seguido da gravação
    pub async fn atualizar_foto_perfil(
        &self,
        caminho: &Path,
        motorista_id: i64,
    ) -> ApiResult<String> {
        let imagem_url = self.enviar_foto(caminho, motorista_id).await?;
        self.atualizar_imagem(motorista_id, &imagem_url).await?;
        Ok(imagem_url)
    }
}

/// Tipo MIME derivado da extensão do arquivo
fn mime_da_extensao(caminho: &Path) -> String {
    match caminho
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some(ext) if !ext.is_empty() => format!("image/{}", ext),
        _ => "application/octet-stream".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_da_extensao() {
        assert_eq!(mime_da_extensao(Path::new("foto.jpg")), "image/jpeg");
        assert_eq!(mime_da_extensao(Path::new("foto.JPEG")), "image/jpeg");
        assert_eq!(mime_da_extensao(Path::new("foto.png")), "image/png");
        assert_eq!(mime_da_extensao(Path::new("foto")), "application/octet-stream");
    }
}
