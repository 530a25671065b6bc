// src/shared/mod.rs

// Estruturas de resposta compartilhadas entre as rotas
pub mod shared_structs;
// Tipo de erro da API e sua tradução para respostas HTTP
pub mod erros;
