pub mod auth;
pub mod monitor;
pub mod notifications;
pub mod pages;
pub mod settings;
