//! Repositorios de persistencia
//! 
//! Frontera de almacenamiento del sistema: los controllers y servicios
//! nunca mutan storage directamente, todas las escrituras pasan por aquí.

pub mod booking_request_repository;
pub mod customer_repository;
pub mod rental_repository;
pub mod vehicle_repository;
