// src/respostas/exportacao.rs

use super::respostas_structs::HzVaccineResponse;

/// Nome do arquivo sugerido ao navegador no download.
pub const NOME_ARQUIVO_CSV: &str = "dados-vacina-hz.csv";

/// Cabeçalhos fixos da exportação, na ordem das colunas.
pub const CABECALHOS: [&str; 13] = [
    "ID",
    "Sexo",
    "Idade",
    "Família teve HZ",
    "Conhece vacina",
    "Aceitou explicação",
    "Interesse vacina",
    "Interesse vacinar",
    "Vacinou local",
    "Retornar outro dia",
    "Motivo não vacinar",
    "Período",
    "Movimento loja",
];

/// Gera o CSV com todas as respostas, uma linha por registro.
///
/// Todo valor vai entre aspas duplas, inclusive os numéricos. Aspas e
/// vírgulas dentro do texto NÃO são escapadas. Quebras de linha dentro de um
/// valor viram um espaço, então o arquivo tem sempre uma linha por registro
/// mais o cabeçalho. Linhas separadas por `\n`, sem quebra de linha no final.
pub fn gerar_csv(respostas: &[HzVaccineResponse]) -> String {
    let mut linhas = Vec::with_capacity(respostas.len() + 1);
    linhas.push(CABECALHOS.join(","));

    for resposta in respostas {
        let linha = resposta
            .colunas()
            .iter()
            .map(|valor| format!("\"{}\"", em_uma_linha(valor)))
            .collect::<Vec<_>>()
            .join(",");
        linhas.push(linha);
    }

    linhas.join("\n")
}

/// `\r\n`, `\n` e `\r` viram um único espaço cada.
fn em_uma_linha(valor: &str) -> String {
    valor.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
