pub mod builtin;
pub mod context;
pub mod loader;
pub mod runner;
pub mod scenario_model;
