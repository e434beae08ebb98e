//! Autenticação do motorista
//!
//! Login, cadastro e recarga do perfil. É o único serviço que escreve na
//! sessão além do status.

use std::sync::Arc;
use validator::Validate;

use crate::models::auth::{LoginRequest, LoginResponse, MotoristaResponse, RegisterRequest, RegisterResponse};
use crate::models::motorista::Motorista;
use crate::services::api_service::ApiService;
use crate::session::SessionStore;
use crate::utils::errors::{domain_error, ApiError, ApiResult};
use crate::utils::validation::{limpar_cpf, normalizar_email, normalizar_usuario, validar_nao_vazio};

pub struct AuthService {
    api: Arc<ApiService>,
    sessao: SessionStore,
}

impl AuthService {
    pub fn new(api: Arc<ApiService>, sessao: SessionStore) -> Self {
        Self { api, sessao }
    }

    /// Autenticar o motorista e gravar o registro na sessão
    pub async fn login(&self, email: &str, senha: &str) -> ApiResult<Motorista> {
        if validar_nao_vazio(email).is_err() || validar_nao_vazio(senha).is_err() {
            return Err(ApiError::Domain("Email e senha são obrigatórios".to_string()));
        }

        let corpo = LoginRequest {
            email: normalizar_email(email),
            senha: senha.to_string(),
        };

        let resposta: LoginResponse = self.api.post("/api/auth/login-motorista", &corpo).await?;
        let motorista = resposta.motorista.ok_or_else(|| {
            ApiError::Deserialization("resposta de login sem dados do motorista".to_string())
        })?;

        log::info!("✅ Login realizado: {} (id {})", motorista.nome, motorista.id);
        self.sessao.replace(motorista.clone()).await;
        Ok(motorista)
    }

    /// Cadastrar um novo motorista
    ///
    /// Normaliza antes de validar: o CPF vai ao servidor só com dígitos,
    /// email e usuário em minúsculas.
    pub async fn registrar(&self, dados: RegisterRequest) -> ApiResult<String> {
        let todos_preenchidos = [&dados.nome, &dados.usuario, &dados.cpf, &dados.email, &dados.senha]
            .iter()
            .all(|campo| validar_nao_vazio(campo).is_ok());
        if !todos_preenchidos {
            return Err(ApiError::Domain("Todos os campos são obrigatórios".to_string()));
        }

        let corpo = RegisterRequest {
            nome: dados.nome.trim().to_string(),
            usuario: normalizar_usuario(&dados.usuario),
            cpf: limpar_cpf(&dados.cpf),
            email: normalizar_email(&dados.email),
            senha: dados.senha,
        };
        corpo.validate()?;

        log::info!("📦 Enviando cadastro do usuário: {}", corpo.usuario);
        let resposta: RegisterResponse = self
            .api
            .post("/api/auth/register-motorista", &corpo)
            .await?;

        Ok(resposta
            .message
            .unwrap_or_else(|| "Cadastro realizado com sucesso".to_string()))
    }

    /// Recarregar o perfil do motorista e atualizar a sessão
    ///
    /// Aceitar um convite muda `empresa_id` no servidor; a mudança só é
    /// observada por esta recarga ou no próximo login.
    pub async fn buscar_dados(&self, motorista_id: i64) -> ApiResult<Motorista> {
        let resposta: MotoristaResponse = self
            .api
            .get(&format!("/api/auth/motorista/{}", motorista_id))
            .await?;

        if !resposta.success {
            return Err(domain_error(resposta.error, "Erro ao buscar dados do motorista"));
        }
        let motorista = resposta.motorista.ok_or_else(|| {
            ApiError::Deserialization("resposta de perfil sem dados do motorista".to_string())
        })?;

        self.sessao.replace(motorista.clone()).await;
        Ok(motorista)
    }

    /// Encerrar a sessão
    pub async fn logout(&self) {
        self.sessao.clear().await;
    }
}
