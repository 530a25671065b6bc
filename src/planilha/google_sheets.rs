// src/planilha/google_sheets.rs

//! Sincronização com o Google Sheets pela API REST v4, autenticada por chave de API.
//!
//! A chave vai no cabeçalho `x-goog-api-key`, nunca na URL: mensagens de erro
//! do reqwest carregam a URL e acabam no log.
//!
//! Cada chamada usa um único `reqwest::Client` com timeout fixo, então uma
//! planilha inacessível nunca segura a resposta ao cliente além desse prazo.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::planilha_structs::{ErroPlanilha, SincronizadorPlanilha};
use crate::respostas::exportacao::CABECALHOS;
use crate::respostas::respostas_structs::HzVaccineResponse;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const INTERVALO_CABECALHO_EXISTENTE: &str = "A1:M1";
const INTERVALO_CABECALHO: &str = "A1:N1";
const INTERVALO_DADOS: &str = "A:N";
const COLUNA_CARIMBO: &str = "Data/Hora";
const CABECALHO_CHAVE_API: &str = "x-goog-api-key";
const LIMITE_PREVIA_CORPO: usize = 160;

/// Parte da resposta de `values.get` que interessa aqui.
#[derive(Debug, Deserialize)]
struct IntervaloValores {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct GoogleSheets {
    client: Client,
    api_key: String,
    planilha_id: String,
}

impl GoogleSheets {
    /// # Errors
    ///
    /// Falha quando o cliente HTTP não pode ser construído.
    pub fn new(
        api_key: impl Into<String>,
        planilha_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ErroPlanilha> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            planilha_id: planilha_id.into(),
        })
    }

    fn url_valores(&self, intervalo: &str) -> String {
        format!("{API_BASE}/{}/values/{intervalo}", self.planilha_id)
    }

    fn requisicao(&self, metodo: Method, url: String) -> RequestBuilder {
        self.client
            .request(metodo, url)
            .header(CABECALHO_CHAVE_API, self.api_key.as_str())
    }

    fn requisicao_anexar(&self, resposta: &HzVaccineResponse, carimbo: &str) -> RequestBuilder {
        let url = format!("{}:append", self.url_valores(INTERVALO_DADOS));
        self.requisicao(Method::POST, url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [linha_planilha(resposta, carimbo)] }))
    }

    /// Escreve o cabeçalho na primeira linha se a planilha ainda estiver vazia.
    pub async fn inicializar(&self) -> Result<(), ErroPlanilha> {
        let resposta = self
            .requisicao(Method::GET, self.url_valores(INTERVALO_CABECALHO_EXISTENTE))
            .send()
            .await?;
        let intervalo: IntervaloValores = verificar_status(resposta).await?.json().await?;

        if intervalo.values.is_empty() {
            self.escrever_cabecalho().await?;
            info!(planilha = %self.planilha_id, "cabeçalho escrito na planilha");
        }
        Ok(())
    }

    async fn escrever_cabecalho(&self) -> Result<(), ErroPlanilha> {
        let resposta = self
            .requisicao(Method::PUT, self.url_valores(INTERVALO_CABECALHO))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [cabecalho_planilha()] }))
            .send()
            .await?;
        verificar_status(resposta).await?;
        Ok(())
    }
}

#[async_trait]
impl SincronizadorPlanilha for GoogleSheets {
    async fn anexar(&self, resposta: &HzVaccineResponse, carimbo: &str) -> Result<(), ErroPlanilha> {
        let envio = self.requisicao_anexar(resposta, carimbo).send().await?;
        verificar_status(envio).await?;

        info!(id = resposta.id, "resposta enviada para a planilha");
        Ok(())
    }
}

async fn verificar_status(resposta: Response) -> Result<Response, ErroPlanilha> {
    let status = resposta.status();
    if status.is_success() {
        return Ok(resposta);
    }
    let corpo = resposta.text().await.unwrap_or_default();
    Err(ErroPlanilha::Status {
        status: status.as_u16(),
        corpo: previa_corpo(&corpo),
    })
}

/// Corpo de erro compactado e cortado para caber numa linha de log.
fn previa_corpo(corpo: &str) -> String {
    let compacto = corpo.split_whitespace().collect::<Vec<_>>().join(" ");
    let previa = compacto.chars().take(LIMITE_PREVIA_CORPO).collect::<String>();
    if compacto.chars().count() > LIMITE_PREVIA_CORPO {
        format!("{previa}...")
    } else {
        previa
    }
}

/// Os 13 cabeçalhos da exportação mais a coluna do carimbo.
fn cabecalho_planilha() -> Vec<&'static str> {
    CABECALHOS.iter().copied().chain([COLUNA_CARIMBO]).collect()
}

/// ID e idade vão como números para a planilha tratá-los como tal.
fn linha_planilha(resposta: &HzVaccineResponse, carimbo: &str) -> Vec<Value> {
    let d = &resposta.dados;
    vec![
        json!(resposta.id),
        json!(d.sexo.as_str()),
        json!(d.idade),
        json!(d.familia_hz.as_str()),
        json!(d.conhece_vacina.as_str()),
        json!(d.aceitou_explicacao.as_str()),
        json!(d.interesse_vacina.as_str()),
        json!(d.interesse_vacinar.as_str()),
        json!(d.vacinou_local.as_str()),
        json!(d.retornar_outro_dia.as_str()),
        json!(d.motivo_nao_vacinar),
        json!(d.periodo.as_str()),
        json!(d.movimento_loja.as_str()),
        json!(carimbo),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resposta_exemplo;

    #[test]
    fn cabecalho_tem_catorze_colunas_com_carimbo_no_fim() {
        let cabecalho = cabecalho_planilha();

        assert_eq!(cabecalho.len(), 14);
        assert_eq!(cabecalho.first(), Some(&"ID"));
        assert_eq!(cabecalho.last(), Some(&"Data/Hora"));
    }

    #[test]
    fn linha_segue_a_ordem_do_cabecalho() {
        let resposta = HzVaccineResponse {
            id: 12,
            dados: resposta_exemplo(),
        };

        let linha = linha_planilha(&resposta, "16/10/2026, 14:03:05");

        assert_eq!(
            linha,
            vec![
                json!(12),
                json!("F"),
                json!(45),
                json!("Sim"),
                json!("Não"),
                json!("Sim"),
                json!("Sim"),
                json!("Sim"),
                json!("Não"),
                json!("Sim"),
                json!(""),
                json!("Manhã"),
                json!("Movimentada"),
                json!("16/10/2026, 14:03:05"),
            ]
        );
    }

    #[test]
    fn url_de_valores_inclui_planilha_e_intervalo() {
        let sheets = GoogleSheets::new("chave", "abc123", Duration::from_secs(1))
            .expect("cliente HTTP");

        assert_eq!(
            sheets.url_valores(INTERVALO_DADOS),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/A:N"
        );
    }

    fn resposta_numero(id: i32) -> HzVaccineResponse {
        HzVaccineResponse {
            id,
            dados: resposta_exemplo(),
        }
    }

    #[test]
    fn chave_vai_no_cabecalho_e_nao_na_url() {
        let sheets = GoogleSheets::new("SEGREDO123", "abc123", Duration::from_secs(1))
            .expect("cliente HTTP");

        let requisicao = sheets
            .requisicao_anexar(&resposta_numero(1), "16/10/2026, 14:03:05")
            .build()
            .expect("requisição");

        assert_eq!(requisicao.method(), &Method::POST);
        assert_eq!(
            requisicao.url().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/A:N:append\
             ?valueInputOption=USER_ENTERED"
        );
        assert!(!requisicao.url().as_str().contains("SEGREDO123"));
        assert_eq!(
            requisicao
                .headers()
                .get(CABECALHO_CHAVE_API)
                .and_then(|valor| valor.to_str().ok()),
            Some("SEGREDO123")
        );
    }

    #[actix_web::test]
    async fn erro_de_transporte_nao_expoe_a_chave() {
        let sheets = GoogleSheets::new("SEGREDO123", "abc", Duration::from_millis(1))
            .expect("cliente HTTP");

        let erro = sheets
            .anexar(&resposta_numero(1), "16/10/2026, 14:03:05")
            .await
            .expect_err("timeout de 1ms");

        assert!(matches!(erro, ErroPlanilha::Transporte(_)));
        assert!(!erro.to_string().contains("SEGREDO123"));
        assert!(!format!("{erro:?}").contains("SEGREDO123"));
    }

    #[test]
    fn previa_compacta_espacos() {
        assert_eq!(
            previa_corpo("{\n  \"error\": {\n    \"code\": 403\n  }\n}"),
            "{ \"error\": { \"code\": 403 } }"
        );
    }

    #[test]
    fn previa_corta_corpos_longos() {
        let corpo = "é".repeat(LIMITE_PREVIA_CORPO + 40);

        let previa = previa_corpo(&corpo);

        assert_eq!(previa.chars().count(), LIMITE_PREVIA_CORPO + 3);
        assert!(previa.ends_with("é..."));
    }
}
