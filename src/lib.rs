//! Cliente do aplicativo do motorista
//!
//! Biblioteca com os clientes tipados da API do marketplace de fretes:
//! autenticação e cadastro, listas e transições de frete, convites de
//! agregação, status de disponibilidade e upload da foto de perfil. O
//! estado do motorista autenticado vive apenas em memória, na
//! `SessionStore`, durante a vida do processo.

pub mod config;
pub mod models;
pub mod services;
pub mod session;
pub mod sync;
pub mod utils;

pub use config::environment::EnvironmentConfig;
pub use services::api_service::ApiService;
pub use services::auth_service::AuthService;
pub use services::convite_service::ConviteService;
pub use services::frete_service::{FreteService, OBSERVACAO_RECUSA_PADRAO};
pub use services::status_service::StatusService;
pub use services::upload_service::UploadService;
pub use session::SessionStore;
pub use utils::errors::{ApiError, ApiResult};
