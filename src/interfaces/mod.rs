pub mod notice;
pub mod service;
