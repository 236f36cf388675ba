pub mod config;
pub mod data_manager;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod external;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
