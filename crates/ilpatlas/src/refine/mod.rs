//! Generate-test-constrain refinement of candidate programs

mod profile;
mod state;
mod stats;

pub use profile::RefinementProfile;
pub use state::{LearnResult, LearningRun};
pub use stats::{ProgramRecord, Stats};

use crate::config::LearnerConfig;
use crate::constrain::ConstraintGenerator;
use crate::enumerator::Enumerator;
use crate::error::Result;
use crate::oracle::CoverageOracle;

/// Run a learning loop to completion and return its result and statistics
pub fn learn(
    config: LearnerConfig,
    enumerator: Box<dyn Enumerator>,
    oracle: Box<dyn CoverageOracle>,
    generator: Box<dyn ConstraintGenerator>,
) -> Result<(LearnResult, Stats)> {
    let mut run = LearningRun::new(config, enumerator, oracle, generator);
    let result = run.learn()?;
    Ok((result, run.stats().clone()))
}
