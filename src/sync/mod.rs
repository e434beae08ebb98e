//! Sequenciamento de requisições
//!
//! Este módulo fecha a corrida entre respostas de listagem que chegam
//! fora de ordem: somente a resposta da requisição mais recente pode ser
//! renderizada.

pub mod sequencer;

pub use sequencer::*;
