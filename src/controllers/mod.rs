//! Controllers de la aplicación
//! 
//! Orquestan las máquinas de estados sobre los repositorios y los
//! colaboradores externos; las routes solo parsean y delegan aquí.

pub mod booking_request_controller;
pub mod calendar_controller;
pub mod rental_controller;
