//! Generation module — prompt building and the generate endpoint.

pub mod handlers;
pub mod prompts;
