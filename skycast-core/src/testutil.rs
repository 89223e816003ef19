//! Deterministic fakes for the transport and position seams.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{PositionError, TransportError};
use crate::model::Coordinates;
use crate::position::PositionSource;
use crate::transport::{QueryValue, Transport};

/// One recorded transport call: the URL plus the rendered parameter pairs
/// (dropped entries recorded as `None`).
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) url: String,
    pub(crate) params: Vec<(String, Option<String>)>,
}

impl RecordedCall {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .and_then(|(_, rendered)| rendered.as_deref())
    }
}

/// Transport fake that replays scripted results in order and records
/// every call it receives.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub(crate) fn returning(payload: Value) -> Self {
        let fake = Self::default();
        fake.push(Ok(payload));
        fake
    }

    pub(crate) fn failing(err: TransportError) -> Self {
        let fake = Self::default();
        fake.push(Err(err));
        fake
    }

    pub(crate) fn push(&self, result: Result<Value, TransportError>) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, QueryValue)],
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.render()))
                .collect(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {url}"))
    }
}

/// Position fake covering the three capability outcomes.
#[derive(Debug, Clone)]
pub(crate) enum FakePosition {
    At(Coordinates),
    Unsupported,
    Fails(String),
}

#[async_trait]
impl PositionSource for FakePosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        match self {
            FakePosition::At(coords) => Ok(*coords),
            FakePosition::Unsupported => Err(PositionError::Unsupported),
            FakePosition::Fails(message) => Err(PositionError::Device(message.clone())),
        }
    }
}
