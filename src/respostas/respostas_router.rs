// src/respostas/respostas_router.rs

use actix_web::{get, http::header, post, web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::exportacao::{gerar_csv, NOME_ARQUIVO_CSV};
use super::respostas_structs::HzVaccineResponse;
use super::validacao::validar_resposta;
use crate::planilha::planilha_structs::{carimbo_sao_paulo, SincronizadorPlanilha};
use crate::shared::erros::ApiErro;
use crate::shared::shared_structs::ErroCampo;
use crate::AppState;

/// Registra as rotas de respostas. A exportação vem antes de `{id}`
/// para que `/export` não seja tratado como um ID.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.service(listar_respostas)
        .service(cadastrar_resposta)
        .service(exportar_csv)
        .service(buscar_resposta_por_id);
}

/// Rota para listar todas as respostas, em ordem de cadastro.
#[get("/api/hz-vaccine-responses")]
pub async fn listar_respostas(data: web::Data<AppState>) -> Result<HttpResponse, ApiErro> {
    let respostas = data.armazenamento.listar_todas().await?;
    Ok(HttpResponse::Ok().json(respostas))
}

/// Rota para cadastrar uma nova resposta do questionário.
///
/// O corpo é lido como JSON sem tipo e validado campo a campo; todos os
/// campos inválidos voltam juntos no 400. Depois de gravar, tenta copiar a
/// resposta para a planilha. Essa cópia nunca muda o resultado da requisição.
#[post("/api/hz-vaccine-responses")]
pub async fn cadastrar_resposta(
    data: web::Data<AppState>,
    corpo: web::Bytes,
) -> Result<HttpResponse, ApiErro> {
    let entrada = ler_json(&corpo)?;

    let nova = validar_resposta(&entrada).map_err(|erros| {
        debug!(campos = erros.len(), "resposta rejeitada na validação");
        ApiErro::Validacao(erros)
    })?;

    let resposta = data.armazenamento.criar(nova).await?;
    info!(id = resposta.id, "resposta cadastrada");

    if let Some(planilha) = &data.planilha {
        sincronizar_planilha(planilha.as_ref(), &resposta).await;
    }

    Ok(HttpResponse::Created().json(resposta))
}

/// Rota para baixar todas as respostas como CSV.
#[get("/api/hz-vaccine-responses/export")]
pub async fn exportar_csv(data: web::Data<AppState>) -> Result<HttpResponse, ApiErro> {
    let respostas = data
        .armazenamento
        .listar_todas()
        .await
        .map_err(ApiErro::ExportacaoFalhou)?;

    if respostas.is_empty() {
        info!("exportação pedida sem respostas cadastradas");
        return Err(ApiErro::NadaParaExportar);
    }

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={NOME_ARQUIVO_CSV}"),
        ))
        .body(gerar_csv(&respostas)))
}

/// Rota para buscar uma resposta por ID.
#[get("/api/hz-vaccine-responses/{id}")]
pub async fn buscar_resposta_por_id(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiErro> {
    let id = path.into_inner();
    match data.armazenamento.buscar_por_id(id).await? {
        Some(resposta) => Ok(HttpResponse::Ok().json(resposta)),
        None => {
            debug!(id, "resposta não encontrada");
            Err(ApiErro::NaoEncontrada)
        }
    }
}

/// Corpo vazio equivale a `{}`, para que cada campo obrigatório seja reportado.
fn ler_json(corpo: &[u8]) -> Result<Value, ApiErro> {
    if corpo.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(corpo).map_err(|e| {
        debug!(error = %e, "corpo JSON malformado");
        ApiErro::Validacao(vec![ErroCampo::new("", "JSON malformado")])
    })
}

/// Uma única tentativa; a falha só vai para o log.
async fn sincronizar_planilha(planilha: &dyn SincronizadorPlanilha, resposta: &HzVaccineResponse) {
    let carimbo = carimbo_sao_paulo(Utc::now());
    if let Err(e) = planilha.anexar(resposta, &carimbo).await {
        warn!(id = resposta.id, error = %e, "falha ao sincronizar com a planilha");
    }
}
