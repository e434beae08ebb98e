//! Token monotônico por lista
//!
//! Cada busca de lista recebe um ticket crescente ao iniciar. Ao
//! concluir, a resposta só é aceita se nenhum ticket mais novo já foi
//! aceito: uma resposta antiga que chega depois de uma mais nova é
//! descartada, nunca renderizada.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequenciador de requisições de uma lista
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    committed: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitir um ticket para uma nova busca
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Tentar aceitar a conclusão de uma busca
    ///
    /// Retorna `false` quando um ticket mais novo já foi aceito; nesse
    /// caso a resposta é obsoleta e deve ser descartada.
    pub fn try_commit(&self, ticket: u64) -> bool {
        let mut atual = self.committed.load(Ordering::SeqCst);
        loop {
            if ticket <= atual {
                return false;
            }
            match self.committed.compare_exchange(
                atual,
                ticket,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(novo) => atual = novo,
            }
        }
    }
}
