pub mod hospital;
pub mod lon_lat;
pub mod registry;
