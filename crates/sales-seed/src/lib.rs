pub mod assertions;
pub mod cli;
pub mod connection;
pub mod data;
pub mod error;
pub mod loader;
pub mod logging;
pub mod profile;
pub mod results;
pub mod system;
