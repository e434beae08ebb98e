//! Sessão do motorista
//!
//! Este módulo guarda em memória o motorista autenticado durante a vida
//! do processo. Não há persistência: reiniciar o aplicativo perde a
//! sessão.

pub mod session_store;

pub use session_store::*;
