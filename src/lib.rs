pub mod api;
pub mod app;
pub mod chat;
pub mod errors;
pub mod key_handlers;
pub mod key_store;
pub mod logging;
pub mod status;
pub mod ui;
