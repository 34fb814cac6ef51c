pub mod app;
pub mod config;
pub mod gateway;
pub mod pages;
pub mod router;
pub mod session;
pub mod shared;
