//! Client core for GiftGenix.
//!
//! [`prompt::PromptController`] drives one gift-suggestion request per
//! submission and keeps the result text for rendering.
//! [`admin::AdminGate`] logs an admin in and rotates the generation
//! service's API key. Both talk to the service through
//! [`interfaces::service::GenerationService`], implemented over HTTP by
//! [`client::HttpGenerationClient`].

pub mod admin;
pub mod admin_fsm;
pub mod client;
pub mod config;
pub mod error;
mod in_flight;
pub mod interfaces;
pub mod logging;
pub mod markdown;
pub mod notice;
pub mod prompt;

pub type Result<T> = std::result::Result<T, error::GiftGenixError>;
