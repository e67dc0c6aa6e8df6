pub mod driver;
pub mod process;
pub mod timeline;

pub use driver::{Outcome, Sim};
pub use process::{FinishedProcess, ProcessSpec, admission_order};
pub use timeline::{Slice, Timeline};

use crate::error::SimError;
use crate::scheduler::{MlqScheduler, Quanta};

/// Runs `specs` under the three-level policy and returns the finished
/// processes in completion order.
pub fn simulate(
    specs: Vec<ProcessSpec>,
    quanta: Quanta,
) -> Result<Vec<FinishedProcess>, SimError> {
    let sim = Sim::new(specs, MlqScheduler::new(quanta))?;
    Ok(sim.run().finished)
}
