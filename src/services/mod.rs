//! Services module
//!
//! Este módulo contém os clientes tipados da API do marketplace. Cada
//! serviço encapsula um grupo de operações e delega as requisições ao
//! `ApiService`.

pub mod api_service;
pub mod auth_service;
pub mod convite_service;
pub mod frete_service;
pub mod status_service;
pub mod upload_service;

pub use api_service::*;
pub use auth_service::*;
pub use convite_service::*;
pub use frete_service::*;
pub use status_service::*;
pub use upload_service::*;
