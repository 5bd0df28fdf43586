use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Source;
use crate::error::KiraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UpstreamError,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&KiraError> for SourceFailure {
    fn from(err: &KiraError) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::UpstreamError
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Outcome of one upstream lookup. A success serializes as the upstream
/// payload itself, a failure as `{"error": {"kind": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamResult {
    Failure { error: SourceFailure },
    Success(Value),
}

impl UpstreamResult {
    pub fn success(payload: impl Into<Value>) -> Self {
        UpstreamResult::Success(payload.into())
    }

    pub fn failure(err: &KiraError) -> Self {
        UpstreamResult::Failure {
            error: SourceFailure::from(err),
        }
    }

    pub fn from_result<T: Into<Value>>(result: Result<T, KiraError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::failure(&err),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UpstreamResult::Failure { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            UpstreamResult::Success(value) => Some(value),
            UpstreamResult::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            UpstreamResult::Failure { error } => Some(error.kind),
            UpstreamResult::Success(_) => None,
        }
    }
}

/// Merged per-symbol record. A missing key means the source had nothing to
/// report, which is different from a recorded failure.
pub type GeneRecord = BTreeMap<Source, UpstreamResult>;

/// Symbol -> merged record, one entry per distinct requested symbol.
pub type BatchResult = BTreeMap<String, GeneRecord>;
