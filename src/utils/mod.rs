//! Utilidades del sistema
//! 
//! Este módulo contiene el manejo de errores y utilidades comunes.

pub mod errors;
