pub mod classifier;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod events;
pub mod gather;
pub mod join;
pub mod params;
pub mod shots;
pub mod summary;
