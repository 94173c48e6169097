pub mod app;
pub mod check;
pub mod config;
pub mod models;
pub mod storage;
