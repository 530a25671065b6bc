// src/respostas/respostas_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::armazenamento::ErroArmazenamento;

/// Gera um enum cujos valores só podem ser os literais listados,
/// serializados exatamente como aparecem no formulário.
macro_rules! opcoes_literais {
    ($(#[$meta:meta])* $nome:ident { $($variante:ident => $literal:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $nome {
            $(#[serde(rename = $literal)] $variante),+
        }

        impl $nome {
            /// Literais aceitos, na ordem em que o formulário os apresenta.
            pub const VALORES: &'static [&'static str] = &[$($literal),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($nome::$variante => $literal),+
                }
            }

            pub fn from_literal(valor: &str) -> Option<Self> {
                match valor {
                    $($literal => Some($nome::$variante),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $nome {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

opcoes_literais! {
    Sexo {
        F => "F",
        M => "M",
        Outro => "Outro",
        PrefereNaoDizer => "Prefere não dizer",
    }
}

opcoes_literais! {
    /// Resposta binária usada pela maioria das perguntas do questionário.
    SimNao {
        Sim => "Sim",
        Nao => "Não",
    }
}

opcoes_literais! {
    Periodo {
        Manha => "Manhã",
        Tarde => "Tarde",
    }
}

opcoes_literais! {
    MovimentoLoja {
        Movimentada => "Movimentada",
        PoucoMovimento => "Pouco movimento",
    }
}

/// Resposta já validada, ainda sem ID.
/// É o único formato aceito na criação; só é produzido pelo validador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertHzVaccineResponse {
    pub sexo: Sexo,
    pub idade: i32,
    pub familia_hz: SimNao,
    pub conhece_vacina: SimNao,
    pub aceitou_explicacao: SimNao,
    pub interesse_vacina: SimNao,
    pub interesse_vacinar: SimNao,
    pub vacinou_local: SimNao,
    pub retornar_outro_dia: SimNao,
    /// Vazio quando o cliente não informou o motivo.
    #[serde(default)]
    pub motivo_nao_vacinar: String,
    pub periodo: Periodo,
    pub movimento_loja: MovimentoLoja,
}

/// Resposta persistida. O `id` é atribuído pelo banco e nunca muda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HzVaccineResponse {
    pub id: i32,
    #[serde(flatten)]
    pub dados: InsertHzVaccineResponse,
}

impl HzVaccineResponse {
    /// Valores das 13 colunas de exportação, na ordem dos cabeçalhos.
    pub fn colunas(&self) -> [String; 13] {
        let d = &self.dados;
        [
            self.id.to_string(),
            d.sexo.to_string(),
            d.idade.to_string(),
            d.familia_hz.to_string(),
            d.conhece_vacina.to_string(),
            d.aceitou_explicacao.to_string(),
            d.interesse_vacina.to_string(),
            d.interesse_vacinar.to_string(),
            d.vacinou_local.to_string(),
            d.retornar_outro_dia.to_string(),
            d.motivo_nao_vacinar.clone(),
            d.periodo.to_string(),
            d.movimento_loja.to_string(),
        ]
    }
}

/// Linha da tabela `hz_vaccine_responses` como o banco a devolve.
/// Os campos de opção são TEXT no banco e só viram enums na conversão.
#[derive(Debug, FromRow)]
pub struct LinhaResposta {
    pub id: i32,
    pub sexo: String,
    pub idade: i32,
    pub familia_hz: String,
    pub conhece_vacina: String,
    pub aceitou_explicacao: String,
    pub interesse_vacina: String,
    pub interesse_vacinar: String,
    pub vacinou_local: String,
    pub retornar_outro_dia: String,
    pub motivo_nao_vacinar: Option<String>,
    pub periodo: String,
    pub movimento_loja: String,
}

impl TryFrom<LinhaResposta> for HzVaccineResponse {
    type Error = ErroArmazenamento;

    fn try_from(linha: LinhaResposta) -> Result<Self, Self::Error> {
        let id = linha.id;
        let invalida = |campo: &'static str| ErroArmazenamento::LinhaInvalida { id, campo };
        let sim_nao = |valor: &str, campo: &'static str| {
            SimNao::from_literal(valor).ok_or_else(|| invalida(campo))
        };

        Ok(HzVaccineResponse {
            id,
            dados: InsertHzVaccineResponse {
                sexo: Sexo::from_literal(&linha.sexo).ok_or_else(|| invalida("sexo"))?,
                idade: linha.idade,
                familia_hz: sim_nao(&linha.familia_hz, "familia_hz")?,
                conhece_vacina: sim_nao(&linha.conhece_vacina, "conhece_vacina")?,
                aceitou_explicacao: sim_nao(&linha.aceitou_explicacao, "aceitou_explicacao")?,
                interesse_vacina: sim_nao(&linha.interesse_vacina, "interesse_vacina")?,
                interesse_vacinar: sim_nao(&linha.interesse_vacinar, "interesse_vacinar")?,
                vacinou_local: sim_nao(&linha.vacinou_local, "vacinou_local")?,
                retornar_outro_dia: sim_nao(&linha.retornar_outro_dia, "retornar_outro_dia")?,
                motivo_nao_vacinar: linha.motivo_nao_vacinar.unwrap_or_default(),
                periodo: Periodo::from_literal(&linha.periodo)
                    .ok_or_else(|| invalida("periodo"))?,
                movimento_loja: MovimentoLoja::from_literal(&linha.movimento_loja)
                    .ok_or_else(|| invalida("movimento_loja"))?,
            },
        })
    }
}
