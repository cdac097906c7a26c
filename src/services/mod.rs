//! Services module
//! 
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que pueden involucrar varios
//! modelos o integraciones externas.

pub mod availability;
pub mod documents;
pub mod notifications;
pub mod overlap;
