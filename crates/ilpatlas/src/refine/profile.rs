//! Structured profiling for the refinement loop
//!
//! Collected when `LearnerConfig::enable_profiling` is set. All
//! instrumentation is gated on `Option::None` otherwise.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::time::Duration;

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

/// Profiling data collected during a learning run.
///
/// All `Duration` fields are serialized as `f64` seconds.
#[derive(Debug, Clone, Default)]
pub struct RefinementProfile {
    // Phase timings
    pub total_time: Duration,
    pub generate_time: Duration,
    pub test_time: Duration,
    pub build_constraints_time: Duration,
    pub ground_time: Duration,
    pub add_constraints_time: Duration,

    // Counters
    pub iterations: usize,
    pub binding_cache_hits: usize,
    pub binding_cache_misses: usize,
}

impl Serialize for RefinementProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RefinementProfile", 9)?;

        s.serialize_field("total_time", &secs(&self.total_time))?;
        s.serialize_field("generate_time", &secs(&self.generate_time))?;
        s.serialize_field("test_time", &secs(&self.test_time))?;
        s.serialize_field("build_constraints_time", &secs(&self.build_constraints_time))?;
        s.serialize_field("ground_time", &secs(&self.ground_time))?;
        s.serialize_field("add_constraints_time", &secs(&self.add_constraints_time))?;

        s.serialize_field("iterations", &self.iterations)?;
        s.serialize_field("binding_cache_hits", &self.binding_cache_hits)?;
        s.serialize_field("binding_cache_misses", &self.binding_cache_misses)?;

        s.end()
    }
}
