// src/respostas/mod.rs

// Tipos da resposta do questionário e mapeamento das linhas do banco
pub mod respostas_structs;
// Validação do corpo recebido
pub mod validacao;
// Persistência (trait + PostgreSQL)
pub mod armazenamento;
// Geração do CSV de exportação
pub mod exportacao;
// Rotas HTTP
pub mod respostas_router;
