//! CLI command implementations.

mod agents;
mod config;
mod doctor;
mod run;
mod validate;

pub use agents::run_agents;
pub use config::run_config;
pub use doctor::run_doctor;
pub use run::run_run;
pub use validate::run_validate;
