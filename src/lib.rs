pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod metrics;
pub mod scheduler;
pub mod sim;

pub use error::SimError;
pub use scheduler::{MlqScheduler, Quanta, Scheduler};
pub use sim::{FinishedProcess, Outcome, ProcessSpec, Sim, simulate};
