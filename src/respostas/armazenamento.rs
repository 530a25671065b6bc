// src/respostas/armazenamento.rs

use async_trait::async_trait;
use sqlx::{query, query_as, Pool, Postgres};

use super::respostas_structs::{HzVaccineResponse, InsertHzVaccineResponse, LinhaResposta};

/// Falhas do armazenamento. Para a API, qualquer uma delas significa
/// "armazenamento indisponível".
#[derive(Debug, thiserror::Error)]
pub enum ErroArmazenamento {
    #[error("erro no banco de dados: {0}")]
    Banco(#[from] sqlx::Error),

    #[error("linha {id} com valor inválido em '{campo}'")]
    LinhaInvalida { id: i32, campo: &'static str },
}

/// Operações de persistência das respostas do questionário.
///
/// Não existe atualização nem exclusão: uma resposta criada é imutável.
#[async_trait]
pub trait ArmazenamentoRespostas: Send + Sync {
    /// Busca uma resposta pelo ID. `Ok(None)` quando não existe.
    async fn buscar_por_id(&self, id: i32) -> Result<Option<HzVaccineResponse>, ErroArmazenamento>;

    /// Todas as respostas, em ordem crescente de ID.
    async fn listar_todas(&self) -> Result<Vec<HzVaccineResponse>, ErroArmazenamento>;

    /// Grava a resposta e devolve o registro com o ID atribuído pelo banco.
    async fn criar(
        &self,
        resposta: InsertHzVaccineResponse,
    ) -> Result<HzVaccineResponse, ErroArmazenamento>;
}

const CRIAR_TABELA: &str = "CREATE TABLE IF NOT EXISTS hz_vaccine_responses (
    id SERIAL PRIMARY KEY,
    sexo TEXT NOT NULL,
    idade INTEGER NOT NULL,
    familia_hz TEXT NOT NULL,
    conhece_vacina TEXT NOT NULL,
    aceitou_explicacao TEXT NOT NULL,
    interesse_vacina TEXT NOT NULL,
    interesse_vacinar TEXT NOT NULL,
    vacinou_local TEXT NOT NULL,
    retornar_outro_dia TEXT NOT NULL,
    motivo_nao_vacinar TEXT,
    periodo TEXT NOT NULL,
    movimento_loja TEXT NOT NULL
)";

// Macro em vez de const para poder entrar em `concat!`.
macro_rules! colunas {
    () => {
        "id, sexo, idade, familia_hz, conhece_vacina, aceitou_explicacao, \
         interesse_vacina, interesse_vacinar, vacinou_local, retornar_outro_dia, \
         motivo_nao_vacinar, periodo, movimento_loja"
    };
}

const BUSCAR_POR_ID: &str = concat!(
    "SELECT ",
    colunas!(),
    " FROM hz_vaccine_responses WHERE id = $1"
);

const LISTAR_TODAS: &str = concat!(
    "SELECT ",
    colunas!(),
    " FROM hz_vaccine_responses ORDER BY id"
);

// Um único INSERT ... RETURNING: ou a linha inteira é gravada com ID, ou nada.
const INSERIR: &str = concat!(
    "INSERT INTO hz_vaccine_responses (sexo, idade, familia_hz, conhece_vacina, \
     aceitou_explicacao, interesse_vacina, interesse_vacinar, vacinou_local, \
     retornar_outro_dia, motivo_nao_vacinar, periodo, movimento_loja) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING ",
    colunas!()
);

/// Motivo vazio é gravado como NULL.
fn motivo_para_coluna(motivo: &str) -> Option<&str> {
    Some(motivo).filter(|m| !m.is_empty())
}

/// Armazenamento em PostgreSQL, tabela `hz_vaccine_responses`.
pub struct ArmazenamentoPostgres {
    db_pool: Pool<Postgres>,
}

impl ArmazenamentoPostgres {
    pub fn new(db_pool: Pool<Postgres>) -> Self {
        Self { db_pool }
    }

    /// Cria a tabela se ainda não existir. Pode ser chamada a cada inicialização.
    pub async fn preparar_tabela(&self) -> Result<(), ErroArmazenamento> {
        query(CRIAR_TABELA).execute(&self.db_pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ArmazenamentoRespostas for ArmazenamentoPostgres {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<HzVaccineResponse>, ErroArmazenamento> {
        let linha = query_as::<_, LinhaResposta>(BUSCAR_POR_ID)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        linha.map(HzVaccineResponse::try_from).transpose()
    }

    async fn listar_todas(&self) -> Result<Vec<HzVaccineResponse>, ErroArmazenamento> {
        let linhas = query_as::<_, LinhaResposta>(LISTAR_TODAS)
            .fetch_all(&self.db_pool)
            .await?;

        linhas.into_iter().map(HzVaccineResponse::try_from).collect()
    }

    async fn criar(
        &self,
        resposta: InsertHzVaccineResponse,
    ) -> Result<HzVaccineResponse, ErroArmazenamento> {
        let linha = query_as::<_, LinhaResposta>(INSERIR)
            .bind(resposta.sexo.as_str())
            .bind(resposta.idade)
            .bind(resposta.familia_hz.as_str())
            .bind(resposta.conhece_vacina.as_str())
            .bind(resposta.aceitou_explicacao.as_str())
            .bind(resposta.interesse_vacina.as_str())
            .bind(resposta.interesse_vacinar.as_str())
            .bind(resposta.vacinou_local.as_str())
            .bind(resposta.retornar_outro_dia.as_str())
            .bind(motivo_para_coluna(&resposta.motivo_nao_vacinar))
            .bind(resposta.periodo.as_str())
            .bind(resposta.movimento_loja.as_str())
            .fetch_one(&self.db_pool)
            .await?;

        HzVaccineResponse::try_from(linha)
    }
}
