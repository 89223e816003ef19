use std::fmt::Debug;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::PositionError;
use crate::model::Coordinates;

/// One-shot source of the caller's current position.
///
/// A single call makes exactly one attempt: it either resolves with
/// coordinates, fails with [`PositionError::Unsupported`] without waiting
/// when the capability is absent, or fails with the device-reported reason.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// Position source backed by the optional `[home]` section of the config
/// file. A host without configured home coordinates has no position
/// capability.
#[derive(Debug, Clone)]
pub struct ConfiguredPositionSource {
    home: Option<Coordinates>,
}

impl ConfiguredPositionSource {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self { home: config.home }
    }
}

#[async_trait]
impl PositionSource for ConfiguredPositionSource {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        self.home.ok_or(PositionError::Unsupported)
    }
}
