//! Lab configuration

use chrono::{DateTime, Utc};

use super::experiment_kind::ExperimentKind;
use super::fixtures::Fixtures;
use crate::{Error, Result};

/// Default denominator for the progress bar.
pub const DEFAULT_TOTAL_TESTS: u32 = 10;

/// Timestamp source for result records.
pub type Clock = fn() -> DateTime<Utc>;

/// Configuration for a [`LabStore`](super::LabStore).
#[derive(Debug, Clone)]
pub struct LabConfig {
    total_tests: u32,
    initial_experiment: ExperimentKind,
    fixtures: Fixtures,
    clock: Clock,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            total_tests: DEFAULT_TOTAL_TESTS,
            initial_experiment: ExperimentKind::default(),
            fixtures: Fixtures::default(),
            clock: Utc::now,
        }
    }
}

impl LabConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> LabConfigBuilder {
        LabConfigBuilder::default()
    }

    /// Get the progress denominator.
    #[must_use]
    pub const fn total_tests(&self) -> u32 {
        self.total_tests
    }

    /// Get the experiment selected when the store is created.
    #[must_use]
    pub const fn initial_experiment(&self) -> ExperimentKind {
        self.initial_experiment
    }

    /// Get the equipment catalogs.
    #[must_use]
    pub const fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Read the configured clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Builder for `LabConfig`.
#[derive(Debug, Default)]
pub struct LabConfigBuilder {
    config: LabConfig,
}

impl LabConfigBuilder {
    /// Set the progress denominator (must be non-zero).
    #[must_use]
    pub const fn total_tests(mut self, total_tests: u32) -> Self {
        self.config.total_tests = total_tests;
        self
    }

    /// Set the experiment selected at start-up.
    #[must_use]
    pub const fn initial_experiment(mut self, experiment: ExperimentKind) -> Self {
        self.config.initial_experiment = experiment;
        self
    }

    /// Replace the built-in equipment catalogs.
    #[must_use]
    pub fn fixtures(mut self, fixtures: Fixtures) -> Self {
        self.config.fixtures = fixtures;
        self
    }

    /// Use a custom timestamp source (e.g. a fixed instant in tests).
    #[must_use]
    pub const fn clock(mut self, clock: Clock) -> Self {
        self.config.clock = clock;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `total_tests` is zero or the
    /// fixtures fail validation.
    pub fn build(self) -> Result<LabConfig> {
        if self.config.total_tests == 0 {
            return Err(Error::InvalidConfig(
                "total_tests must be greater than 0".to_string(),
            ));
        }
        self.config.fixtures.validate()?;
        Ok(self.config)
    }
}
