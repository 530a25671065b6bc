// src/respostas/validacao.rs

//! Validação do corpo recebido na criação de respostas.
//!
//! Função pura: recebe o JSON sem tipo e devolve uma
//! [`InsertHzVaccineResponse`] ou a lista de todos os campos inválidos,
//! na ordem do formulário. Não para no primeiro erro.

use serde_json::{Map, Value};

use super::respostas_structs::{InsertHzVaccineResponse, MovimentoLoja, Periodo, Sexo, SimNao};
use crate::shared::shared_structs::ErroCampo;

pub const IDADE_MINIMA: i32 = 18;
pub const IDADE_MAXIMA: i32 = 120;
pub const MOTIVO_MAX_CARACTERES: usize = 500;

const CAMPO_OBRIGATORIO: &str = "Campo obrigatório";

/// Valida um corpo JSON arbitrário contra o esquema da resposta.
pub fn validar_resposta(entrada: &Value) -> Result<InsertHzVaccineResponse, Vec<ErroCampo>> {
    let Some(objeto) = entrada.as_object() else {
        return Err(vec![ErroCampo::new(
            "",
            format!("Esperado objeto, recebido {}", tipo_json(entrada)),
        )]);
    };

    let mut v = Validador {
        objeto,
        erros: Vec::new(),
    };

    let sexo = v.opcao("sexo", Sexo::VALORES, Sexo::from_literal);
    let idade = v.idade();
    let familia_hz = v.sim_nao("familia_hz");
    let conhece_vacina = v.sim_nao("conhece_vacina");
    let aceitou_explicacao = v.sim_nao("aceitou_explicacao");
    let interesse_vacina = v.sim_nao("interesse_vacina");
    let interesse_vacinar = v.sim_nao("interesse_vacinar");
    let vacinou_local = v.sim_nao("vacinou_local");
    let retornar_outro_dia = v.sim_nao("retornar_outro_dia");
    let motivo_nao_vacinar = v.motivo();
    let periodo = v.opcao("periodo", Periodo::VALORES, Periodo::from_literal);
    let movimento_loja = v.opcao("movimento_loja", MovimentoLoja::VALORES, MovimentoLoja::from_literal);

    let (
        Some(sexo),
        Some(idade),
        Some(familia_hz),
        Some(conhece_vacina),
        Some(aceitou_explicacao),
        Some(interesse_vacina),
        Some(interesse_vacinar),
        Some(vacinou_local),
        Some(retornar_outro_dia),
        Some(motivo_nao_vacinar),
        Some(periodo),
        Some(movimento_loja),
    ) = (
        sexo,
        idade,
        familia_hz,
        conhece_vacina,
        aceitou_explicacao,
        interesse_vacina,
        interesse_vacinar,
        vacinou_local,
        retornar_outro_dia,
        motivo_nao_vacinar,
        periodo,
        movimento_loja,
    )
    else {
        return Err(v.erros);
    };

    Ok(InsertHzVaccineResponse {
        sexo,
        idade,
        familia_hz,
        conhece_vacina,
        aceitou_explicacao,
        interesse_vacina,
        interesse_vacinar,
        vacinou_local,
        retornar_outro_dia,
        motivo_nao_vacinar,
        periodo,
        movimento_loja,
    })
}

/// Acumula os erros enquanto cada campo é lido de forma independente.
struct Validador<'a> {
    objeto: &'a Map<String, Value>,
    erros: Vec<ErroCampo>,
}

impl<'a> Validador<'a> {
    fn erro(&mut self, campo: &str, mensagem: impl Into<String>) {
        self.erros.push(ErroCampo::new(campo, mensagem));
    }

    /// `null` conta como ausente.
    fn valor(&self, campo: &str) -> Option<&'a Value> {
        self.objeto.get(campo).filter(|valor| !valor.is_null())
    }

    fn opcao<T>(
        &mut self,
        campo: &str,
        valores: &[&str],
        converter: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let valor = match self.valor(campo) {
            None => {
                self.erro(campo, CAMPO_OBRIGATORIO);
                return None;
            }
            Some(Value::String(texto)) => texto.clone(),
            Some(outro) => {
                let mensagem = format!("Esperado texto, recebido {}", tipo_json(outro));
                self.erro(campo, mensagem);
                return None;
            }
        };

        let convertido = converter(&valor);
        if convertido.is_none() {
            let esperado = valores
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            self.erro(
                campo,
                format!("Valor inválido. Esperado {esperado}, recebido '{valor}'"),
            );
        }
        convertido
    }

    fn sim_nao(&mut self, campo: &str) -> Option<SimNao> {
        self.opcao(campo, SimNao::VALORES, SimNao::from_literal)
    }

    fn idade(&mut self) -> Option<i32> {
        const CAMPO: &str = "idade";

        let numero = match self.valor(CAMPO) {
            None => {
                self.erro(CAMPO, CAMPO_OBRIGATORIO);
                return None;
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(numero) => numero,
                None => {
                    self.erro(CAMPO, "Idade deve ser um número inteiro");
                    return None;
                }
            },
            Some(outro) => {
                let mensagem = format!("Esperado número, recebido {}", tipo_json(outro));
                self.erro(CAMPO, mensagem);
                return None;
            }
        };

        if numero < f64::from(IDADE_MINIMA) {
            self.erro(CAMPO, format!("Idade deve ser no mínimo {IDADE_MINIMA} anos"));
            return None;
        }
        if numero > f64::from(IDADE_MAXIMA) {
            self.erro(CAMPO, format!("Idade deve ser no máximo {IDADE_MAXIMA} anos"));
            return None;
        }
        if numero.fract() != 0.0 {
            self.erro(CAMPO, "Idade deve ser um número inteiro");
            return None;
        }

        // Dentro de [18, 120] e sem parte fracionária: a conversão é exata.
        Some(numero as i32)
    }

    /// Opcional: ausente vira texto vazio.
    fn motivo(&mut self) -> Option<String> {
        const CAMPO: &str = "motivo_nao_vacinar";

        let texto = match self.valor(CAMPO) {
            None => return Some(String::new()),
            Some(Value::String(texto)) => texto.clone(),
            Some(outro) => {
                let mensagem = format!("Esperado texto, recebido {}", tipo_json(outro));
                self.erro(CAMPO, mensagem);
                return None;
            }
        };

        if texto.chars().count() > MOTIVO_MAX_CARACTERES {
            self.erro(
                CAMPO,
                format!("Motivo deve ter no máximo {MOTIVO_MAX_CARACTERES} caracteres"),
            );
            return None;
        }
        Some(texto)
    }
}

fn tipo_json(valor: &Value) -> &'static str {
    match valor {
        Value::Null => "nulo",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "número",
        Value::String(_) => "texto",
        Value::Array(_) => "lista",
        Value::Object(_) => "objeto",
    }
}
