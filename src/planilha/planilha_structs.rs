// src/planilha/planilha_structs.rs

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::respostas::respostas_structs::HzVaccineResponse;

/// São Paulo não tem horário de verão desde 2019: UTC-03:00 fixo.
const HORAS_ATRAS_DE_UTC: i64 = 3;
const FORMATO_CARIMBO: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum ErroPlanilha {
    #[error("falha de comunicação com a planilha: {0}")]
    Transporte(#[source] reqwest::Error),

    #[error("planilha respondeu {status}: {corpo}")]
    Status { status: u16, corpo: String },
}

// A URL sai do erro antes de chegar ao log.
impl From<reqwest::Error> for ErroPlanilha {
    fn from(erro: reqwest::Error) -> Self {
        Self::Transporte(erro.without_url())
    }
}

/// Destino externo opcional que recebe uma cópia de cada resposta criada.
///
/// Falhas são só registradas por quem chama; nunca desfazem a gravação.
#[async_trait]
pub trait SincronizadorPlanilha: Send + Sync {
    /// Acrescenta uma linha com a resposta e o carimbo já formatado.
    async fn anexar(&self, resposta: &HzVaccineResponse, carimbo: &str) -> Result<(), ErroPlanilha>;
}

/// Data/hora no formato `dd/mm/aaaa, HH:MM:SS`, horário de São Paulo.
pub fn carimbo_sao_paulo(instante: DateTime<Utc>) -> String {
    (instante.naive_utc() - Duration::hours(HORAS_ATRAS_DE_UTC))
        .format(FORMATO_CARIMBO)
        .to_string()
}
