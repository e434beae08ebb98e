//! Utilidades de validação e normalização
//!
//! Este módulo contém funções helper para limpeza dos dados digitados
//! pelo motorista antes de enviá-los ao servidor.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref CPF_RE: Regex = Regex::new(r"^\d{11}$").unwrap();
}

/// Remover tudo que não for dígito do CPF
///
/// O servidor armazena apenas os 11 dígitos; pontos e traços digitados
/// no formulário são descartados aqui.
pub fn limpar_cpf(cpf: &str) -> String {
    cpf.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validar CPF já limpo (11 dígitos)
pub fn validar_cpf(cpf: &str) -> Result<(), ValidationError> {
    if !CPF_RE.is_match(cpf) {
        let mut error = ValidationError::new("cpf");
        error.add_param("value".into(), &cpf.to_string());
        error.add_param("format".into(), &"11 dígitos".to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar email: sem espaços nas pontas e em minúsculas
pub fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizar nome de usuário: sem espaços nas pontas e em minúsculas
pub fn normalizar_usuario(usuario: &str) -> String {
    usuario.trim().to_lowercase()
}

/// Validar que um campo não está vazio
pub fn validar_nao_vazio(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("nao_vazio");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Formatar valor monetário no padrão brasileiro
pub fn formatar_valor(valor: f64) -> String {
    format!("R$ {:.2}", valor).replace('.', ",")
}

/// Formatar data no padrão brasileiro (dd/mm/aaaa)
pub fn formatar_data(data: &chrono::DateTime<chrono::Utc>) -> String {
    data.format("%d/%m/%Y").to_string()
}
