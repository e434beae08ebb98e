//! Contexto de sessão compartilhado
//!
//! O registro do motorista é substituído por inteiro a cada login ou
//! atualização de perfil e removido apenas no logout. Há um único
//! escritor lógico em operação normal (o usuário tocando botões); em
//! caso de corrida, a última escrita vence e o contador de versão
//! permite detectar leituras obsoletas.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::motorista::Motorista;

#[derive(Debug, Default)]
struct SessionInner {
    motorista: Option<Motorista>,
    version: u64,
}

/// Armazenamento da sessão do motorista autenticado
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substituir o registro inteiro do motorista
    ///
    /// Retorna a nova versão da sessão.
    pub async fn replace(&self, motorista: Motorista) -> u64 {
        let mut inner = self.inner.write().await;
        inner.motorista = Some(motorista);
        inner.version += 1;
        log::info!("👤 Sessão atualizada (versão {})", inner.version);
        inner.version
    }

    /// Limpar a sessão (logout), único caminho de remoção
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.motorista = None;
        inner.version += 1;
        log::info!("👋 Sessão encerrada");
    }

    /// Cópia do registro atual do motorista, se autenticado
    pub async fn current(&self) -> Option<Motorista> {
        self.inner.read().await.motorista.clone()
    }

    /// Versão atual da sessão (incrementa a cada replace/clear)
    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    /// Id do motorista autenticado
    pub async fn motorista_id(&self) -> Option<i64> {
        self.inner.read().await.motorista.as_ref().map(|m| m.id)
    }
}
