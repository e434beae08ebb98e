//! Modelos do sistema
//!
//! Este módulo contém todos os modelos de dados que mapeiam exatamente
//! o formato JSON trocado com o backend de fretes.

pub mod auth;
pub mod convite;
pub mod frete;
pub mod motorista;

pub use auth::*;
pub use convite::*;
pub use frete::*;
pub use motorista::*;
