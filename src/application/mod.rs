// Application layer - Use cases over the repositories
pub mod sheet_repository;
pub mod sync_service;
pub mod weather_repository;
pub mod weather_service;
