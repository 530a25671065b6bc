// src/main.rs

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

// Importa os módulos
mod config;     // Configuração lida do ambiente
mod planilha;   // Sincronização opcional com o Google Sheets
mod respostas;  // Módulo das respostas do questionário de vacina HZ
mod shared;     // Módulo shared
#[cfg(test)]
mod test_support;

use config::{Configuracao, ConfiguracaoPlanilha};
use planilha::google_sheets::GoogleSheets;
use planilha::planilha_structs::SincronizadorPlanilha;
use respostas::armazenamento::{ArmazenamentoPostgres, ArmazenamentoRespostas};

// Estado compartilhado entre as rotas: o armazenamento e, se configurado,
// o sincronizador da planilha. Ambos são criados uma vez aqui e injetados.
pub struct AppState {
    pub armazenamento: Arc<dyn ArmazenamentoRespostas>,
    pub planilha: Option<Arc<dyn SincronizadorPlanilha>>,
}

// Função principal da aplicação Actix Web.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // RUST_LOG controla o nível; sem ele, só info e acima.
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filtro).try_init() {
        eprintln!("Falha ao iniciar o tracing: {e}");
    }

    let config = Configuracao::do_ambiente().map_err(|e| {
        error!(error = %e, "configuração inválida");
        std::io::Error::other(e)
    })?;

    // Conecta ao banco de dados PostgreSQL usando um pool de conexões.
    let db_pool = Pool::<Postgres>::connect(&config.database_url)
        .await
        .map_err(|e| {
            error!(error = %e, "falha ao conectar ao banco PostgreSQL");
            std::io::Error::other(e)
        })?;

    let armazenamento = ArmazenamentoPostgres::new(db_pool);
    armazenamento.preparar_tabela().await.map_err(|e| {
        error!(error = %e, "falha ao preparar a tabela de respostas");
        std::io::Error::other(e)
    })?;

    let planilha = match &config.planilha {
        Some(config_planilha) => iniciar_planilha(config_planilha).await,
        None => {
            warn!("integração com o Google Sheets desabilitada: credenciais ausentes");
            None
        }
    };

    // web::Data é usado para compartilhar o estado entre as rotas.
    let app_state = web::Data::new(AppState {
        armazenamento: Arc::new(armazenamento),
        planilha,
    });

    info!(host = %config.host, porta = config.porta, "iniciando API de respostas HZ");

    // Configura e inicia o servidor HTTP.
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(respostas::respostas_router::configurar)
    })
    .bind((config.host.as_str(), config.porta))?
    .run()
    .await
}

/// Constrói o cliente da planilha e garante o cabeçalho.
/// Falha na inicialização do cabeçalho não impede o uso do sincronizador;
/// falha na construção do cliente desabilita a integração.
async fn iniciar_planilha(config: &ConfiguracaoPlanilha) -> Option<Arc<dyn SincronizadorPlanilha>> {
    let sheets = match GoogleSheets::new(&config.api_key, &config.planilha_id, config.timeout) {
        Ok(sheets) => sheets,
        Err(e) => {
            error!(error = %e, "falha ao criar o cliente do Google Sheets");
            return None;
        }
    };

    match sheets.inicializar().await {
        Ok(()) => info!("integração com o Google Sheets inicializada"),
        Err(e) => warn!(error = %e, "falha ao inicializar o Google Sheets"),
    }

    Some(Arc::new(sheets))
}
