// src/test_support.rs

//! Dublês usados pelos testes: armazenamento em memória, armazenamento
//! sempre indisponível e planilhas que registram ou recusam os envios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::planilha::planilha_structs::{ErroPlanilha, SincronizadorPlanilha};
use crate::respostas::armazenamento::{ArmazenamentoRespostas, ErroArmazenamento};
use crate::respostas::respostas_structs::{
    HzVaccineResponse, InsertHzVaccineResponse, MovimentoLoja, Periodo, Sexo, SimNao,
};
use crate::AppState;

/// Corpo do formulário usado como cenário base, sem `motivo_nao_vacinar`.
pub fn corpo_exemplo() -> Value {
    json!({
        "sexo": "F",
        "idade": 45,
        "familia_hz": "Sim",
        "conhece_vacina": "Não",
        "aceitou_explicacao": "Sim",
        "interesse_vacina": "Sim",
        "interesse_vacinar": "Sim",
        "vacinou_local": "Não",
        "retornar_outro_dia": "Sim",
        "periodo": "Manhã",
        "movimento_loja": "Movimentada",
    })
}

/// O mesmo cenário de [`corpo_exemplo`], já validado.
pub fn resposta_exemplo() -> InsertHzVaccineResponse {
    InsertHzVaccineResponse {
        sexo: Sexo::F,
        idade: 45,
        familia_hz: SimNao::Sim,
        conhece_vacina: SimNao::Nao,
        aceitou_explicacao: SimNao::Sim,
        interesse_vacina: SimNao::Sim,
        interesse_vacinar: SimNao::Sim,
        vacinou_local: SimNao::Nao,
        retornar_outro_dia: SimNao::Sim,
        motivo_nao_vacinar: String::new(),
        periodo: Periodo::Manha,
        movimento_loja: MovimentoLoja::Movimentada,
    }
}

pub fn estado(
    armazenamento: impl ArmazenamentoRespostas + 'static,
    planilha: Option<Arc<dyn SincronizadorPlanilha>>,
) -> AppState {
    AppState {
        armazenamento: Arc::new(armazenamento),
        planilha,
    }
}

#[derive(Default)]
struct Tabela {
    proximo_id: i32,
    registros: Vec<HzVaccineResponse>,
}

/// Armazenamento em memória com IDs crescentes a partir de 1.
/// Clones compartilham a mesma tabela.
#[derive(Clone, Default)]
pub struct ArmazenamentoMemoria {
    tabela: Arc<Mutex<Tabela>>,
}

impl ArmazenamentoMemoria {
    pub fn registros(&self) -> Vec<HzVaccineResponse> {
        self.tabela.lock().expect("lock da tabela").registros.clone()
    }
}

#[async_trait]
impl ArmazenamentoRespostas for ArmazenamentoMemoria {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<HzVaccineResponse>, ErroArmazenamento> {
        let tabela = self.tabela.lock().expect("lock da tabela");
        Ok(tabela.registros.iter().find(|r| r.id == id).cloned())
    }

    async fn listar_todas(&self) -> Result<Vec<HzVaccineResponse>, ErroArmazenamento> {
        Ok(self.registros())
    }

    async fn criar(
        &self,
        resposta: InsertHzVaccineResponse,
    ) -> Result<HzVaccineResponse, ErroArmazenamento> {
        let mut tabela = self.tabela.lock().expect("lock da tabela");
        tabela.proximo_id += 1;
        let criada = HzVaccineResponse {
            id: tabela.proximo_id,
            dados: resposta,
        };
        tabela.registros.push(criada.clone());
        Ok(criada)
    }
}

/// Armazenamento cujo banco nunca responde.
pub struct ArmazenamentoComFalha;

#[async_trait]
impl ArmazenamentoRespostas for ArmazenamentoComFalha {
    async fn buscar_por_id(&self, _id: i32) -> Result<Option<HzVaccineResponse>, ErroArmazenamento> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn listar_todas(&self) -> Result<Vec<HzVaccineResponse>, ErroArmazenamento> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn criar(
        &self,
        _resposta: InsertHzVaccineResponse,
    ) -> Result<HzVaccineResponse, ErroArmazenamento> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

/// Planilha que guarda cada envio com seu carimbo.
#[derive(Clone, Default)]
pub struct PlanilhaMemoria {
    enviadas: Arc<Mutex<Vec<(HzVaccineResponse, String)>>>,
}

impl PlanilhaMemoria {
    pub fn enviadas(&self) -> Vec<(HzVaccineResponse, String)> {
        self.enviadas.lock().expect("lock da planilha").clone()
    }
}

#[async_trait]
impl SincronizadorPlanilha for PlanilhaMemoria {
    async fn anexar(&self, resposta: &HzVaccineResponse, carimbo: &str) -> Result<(), ErroPlanilha> {
        self.enviadas
            .lock()
            .expect("lock da planilha")
            .push((resposta.clone(), carimbo.to_string()));
        Ok(())
    }
}

/// Planilha que recusa todo envio, contando as tentativas.
#[derive(Clone, Default)]
pub struct PlanilhaComFalha {
    tentativas: Arc<AtomicUsize>,
}

impl PlanilhaComFalha {
    pub fn tentativas(&self) -> usize {
        self.tentativas.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SincronizadorPlanilha for PlanilhaComFalha {
    async fn anexar(&self, _resposta: &HzVaccineResponse, _carimbo: &str) -> Result<(), ErroPlanilha> {
        self.tentativas.fetch_add(1, Ordering::SeqCst);
        Err(ErroPlanilha::Status {
            status: 503,
            corpo: "indisponível".to_string(),
        })
    }
}
