// src/planilha/mod.rs

// Contrato do sincronizador e formatação do carimbo de data/hora
pub mod planilha_structs;
// Implementação sobre a API REST do Google Sheets
pub mod google_sheets;
