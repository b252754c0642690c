pub mod error;
pub mod osrm;
pub mod route_provider;
