pub mod config;
pub mod prompt;
pub mod schema;
pub mod serve;
