// Library interface for the ticket form - exposes modules for testing

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod intake_client;
pub mod metrics_server;
pub mod render;
pub mod runtime;
pub mod support;
pub mod surface;

pub use config::Config;
pub use form::TicketForm;
pub use runtime::{FormEvent, FormHandle, FormRuntime};
