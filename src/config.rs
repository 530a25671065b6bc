// src/config.rs

use std::time::Duration;

const HOST_PADRAO: &str = "0.0.0.0";
const PORTA_PADRAO: u16 = 5000;
const TIMEOUT_PLANILHA_PADRAO_SEGS: u64 = 10;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErroConfiguracao {
    #[error("variável de ambiente {0} não definida")]
    Ausente(&'static str),

    #[error("valor inválido em {variavel}: '{valor}'")]
    Invalida { variavel: &'static str, valor: String },
}

/// Credenciais da planilha. Só existe quando as duas variáveis estão definidas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguracaoPlanilha {
    pub api_key: String,
    pub planilha_id: String,
    pub timeout: Duration,
}

/// Configuração do processo, lida uma única vez na inicialização.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuracao {
    pub database_url: String,
    pub host: String,
    pub porta: u16,
    pub planilha: Option<ConfiguracaoPlanilha>,
}

impl Configuracao {
    pub fn do_ambiente() -> Result<Self, ErroConfiguracao> {
        Self::carregar(|nome| std::env::var(nome).ok())
    }

    /// Monta a configuração a partir de uma função de consulta, para que os
    /// testes não dependam das variáveis do processo. Valores vazios contam
    /// como ausentes.
    pub fn carregar(consultar: impl Fn(&str) -> Option<String>) -> Result<Self, ErroConfiguracao> {
        let ler = |nome: &str| consultar(nome).filter(|v| !v.trim().is_empty());

        let database_url = ler("DATABASE_URL").ok_or(ErroConfiguracao::Ausente("DATABASE_URL"))?;
        let host = ler("HOST").unwrap_or_else(|| HOST_PADRAO.to_string());
        let porta = match ler("PORT") {
            Some(valor) => valor.trim().parse::<u16>().map_err(|_| ErroConfiguracao::Invalida {
                variavel: "PORT",
                valor,
            })?,
            None => PORTA_PADRAO,
        };

        let planilha = match (ler("GOOGLE_SHEETS_API_KEY"), ler("GOOGLE_SHEETS_SPREADSHEET_ID")) {
            (Some(api_key), Some(planilha_id)) => {
                let segundos = match ler("GOOGLE_SHEETS_TIMEOUT_SECS") {
                    Some(valor) => valor
                        .trim()
                        .parse::<u64>()
                        .ok()
                        .filter(|s| *s > 0)
                        .ok_or(ErroConfiguracao::Invalida {
                            variavel: "GOOGLE_SHEETS_TIMEOUT_SECS",
                            valor,
                        })?,
                    None => TIMEOUT_PLANILHA_PADRAO_SEGS,
                };
                Some(ConfiguracaoPlanilha {
                    api_key,
                    planilha_id,
                    timeout: Duration::from_secs(segundos),
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            porta,
            planilha,
        })
    }
}
