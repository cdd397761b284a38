//! Configuration for changelist synthesis.

use eco_common::DEFAULT_DRIVER_PIN;

/// Synthesis configuration.
///
/// - driver_pin: output pin that identifies an inserted buffer as the driver
///   of a net (`Y` for the supported libraries).
/// - parallel: parse the two component tables concurrently. Only honored
///   when the crate is built with the `parallel` feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Output pin of an inserted buffer.
    pub driver_pin: String,
    /// Parse the two component tables concurrently.
    pub parallel: bool,
}

impl Config {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    driver_pin: String,
    parallel: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            driver_pin: DEFAULT_DRIVER_PIN.to_string(),
            parallel: false,
        }
    }
}

impl ConfigBuilder {
    /// Set the driver pin name.
    pub fn driver_pin(mut self, pin: impl Into<String>) -> Self {
        self.driver_pin = pin.into();
        self
    }

    /// Enable or disable concurrent parsing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Finish the configuration.
    pub fn build(self) -> Config {
        Config {
            driver_pin: self.driver_pin,
            parallel: self.parallel,
        }
    }
}
