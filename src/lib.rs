// Crew Helper - interactive multi-role planning assistant
// Library exports

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod providers;
pub mod roles;
pub mod session;
pub mod testing;
pub mod workspace;
