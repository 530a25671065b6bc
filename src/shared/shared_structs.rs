// src/shared/shared_structs.rs

use serde::{Deserialize, Serialize};

/// Corpo padrão das respostas de erro da API.
/// `errors` só aparece nas falhas de validação.
#[derive(Debug, Serialize, Deserialize)]
pub struct MensagemResposta {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")] // Não serializa 'errors' se for None
    pub errors: Option<Vec<ErroCampo>>,
}

impl MensagemResposta {
    pub fn simples(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

/// Erro de validação de um único campo.
/// `field` usa caminho separado por pontos; vazio quando o erro é do corpo inteiro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErroCampo {
    pub field: String,
    pub message: String,
}

impl ErroCampo {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
