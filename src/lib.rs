//! Ecoleta: API de pontos de coleta de recicláveis e a lógica dos clientes
//! (cadastro web e navegação mobile).

pub mod client;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
