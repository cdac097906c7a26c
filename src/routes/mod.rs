pub mod booking_request_routes;
pub mod calendar_routes;
pub mod rental_routes;
pub mod vehicle_routes;
