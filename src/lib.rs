// src/lib.rs — Library root for roomchat

pub mod channel;
pub mod cli;
pub mod infra;
pub mod render;
pub mod session;
pub mod setup;
pub mod upload;
