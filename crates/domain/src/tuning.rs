use chrono::Duration;

/// Tunable constants of the selection and prescription engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Steepness of the local recovery sigmoid.
    pub recovery_steepness: f64,
    /// Steepness of the CNS fatigue sigmoid.
    pub cns_steepness: f64,
    pub candidate_pool_size: usize,
    pub backup_interval: Duration,
    pub rpe_window: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            recovery_steepness: 3.0,
            cns_steepness: 1.5,
            candidate_pool_size: 10,
            backup_interval: Duration::days(7),
            rpe_window: 15,
        }
    }
}
