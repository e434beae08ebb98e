//! Configuração do projeto
//!
//! Este módulo contém a configuração de variáveis de ambiente do cliente.

pub mod environment;

pub use environment::*;
