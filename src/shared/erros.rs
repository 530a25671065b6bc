// src/shared/erros.rs

//! Erros da API e sua tradução para respostas HTTP.
//!
//! As rotas devolvem `Result<_, ApiErro>`; o status e o corpo JSON são
//! decididos aqui, e os detalhes internos de falhas de armazenamento
//! só vão para o log.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use super::shared_structs::{ErroCampo, MensagemResposta};
use crate::respostas::armazenamento::ErroArmazenamento;

#[derive(Debug, thiserror::Error)]
pub enum ApiErro {
    /// Um ou mais campos violam o esquema. Sempre culpa do cliente.
    #[error("Dados inválidos")]
    Validacao(Vec<ErroCampo>),

    #[error("Resposta não encontrada")]
    NaoEncontrada,

    /// Não há registros para exportar. Condição esperada, não falha.
    #[error("Nenhum dado encontrado para exportar")]
    NadaParaExportar,

    #[error("Erro interno do servidor")]
    ArmazenamentoIndisponivel(#[source] ErroArmazenamento),

    #[error("Erro ao exportar dados")]
    ExportacaoFalhou(#[source] ErroArmazenamento),
}

impl From<ErroArmazenamento> for ApiErro {
    fn from(value: ErroArmazenamento) -> Self {
        ApiErro::ArmazenamentoIndisponivel(value)
    }
}

impl ResponseError for ApiErro {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiErro::Validacao(_) => StatusCode::BAD_REQUEST,
            ApiErro::NaoEncontrada | ApiErro::NadaParaExportar => StatusCode::NOT_FOUND,
            ApiErro::ArmazenamentoIndisponivel(_) | ApiErro::ExportacaoFalhou(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let corpo = match self {
            ApiErro::Validacao(erros) => MensagemResposta {
                message: self.to_string(),
                errors: Some(erros.clone()),
            },
            ApiErro::ArmazenamentoIndisponivel(causa) | ApiErro::ExportacaoFalhou(causa) => {
                // O detalhe fica no log; o cliente recebe só a mensagem genérica.
                error!(error = %causa, "falha no armazenamento de respostas");
                MensagemResposta::simples(self.to_string())
            }
            ApiErro::NaoEncontrada | ApiErro::NadaParaExportar => {
                MensagemResposta::simples(self.to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(corpo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn corpo(erro: ApiErro) -> (StatusCode, MensagemResposta) {
        let resposta = erro.error_response();
        let status = resposta.status();
        let bytes = to_bytes(resposta.into_body())
            .await
            .expect("corpo da resposta");
        let corpo = serde_json::from_slice(&bytes).expect("JSON válido");
        (status, corpo)
    }

    #[actix_web::test]
    async fn validacao_lista_cada_campo() {
        let erros = vec![
            ErroCampo::new("idade", "Idade deve ser no mínimo 18 anos"),
            ErroCampo::new("sexo", "Campo obrigatório"),
        ];

        let (status, corpo) = corpo(ApiErro::Validacao(erros.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(corpo.message, "Dados inválidos");
        assert_eq!(corpo.errors, Some(erros));
    }

    #[rstest]
    #[case(ApiErro::ArmazenamentoIndisponivel(ErroArmazenamento::LinhaInvalida { id: 7, campo: "sexo" }), "Erro interno do servidor")]
    #[case(ApiErro::ExportacaoFalhou(ErroArmazenamento::LinhaInvalida { id: 7, campo: "sexo" }), "Erro ao exportar dados")]
    #[actix_web::test]
    async fn falha_de_armazenamento_nao_vaza_detalhes(
        #[case] erro: ApiErro,
        #[case] esperado: &str,
    ) {
        let (status, corpo) = corpo(erro).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(corpo.message, esperado);
        assert!(corpo.errors.is_none());
    }

    #[actix_web::test]
    async fn resposta_ausente_e_404() {
        let (status, corpo) = corpo(ApiErro::NaoEncontrada).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(corpo.message, "Resposta não encontrada");
        assert!(corpo.errors.is_none());
    }

    #[actix_web::test]
    async fn nada_para_exportar_e_404() {
        let (status, corpo) = corpo(ApiErro::NadaParaExportar).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(corpo.message, "Nenhum dado encontrado para exportar");
    }
}
