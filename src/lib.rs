//! Venezuelan Truco: rules engine, computer opponent and a local game server

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
