pub mod cli;
pub mod commands;
pub mod generators;
pub mod utils;
