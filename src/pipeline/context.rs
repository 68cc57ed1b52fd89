//! Evaluation context management.
//!
//! Provides per-evaluation identity for logging. Inputs are identified by
//! a short SHA-256 prefix so untrusted text never lands in log lines.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::logging::structured::LogContext;

use super::evaluator::FailurePolicy;

/// Hex characters kept from an input digest.
const DIGEST_PREFIX_LEN: usize = 12;

/// Context for a single evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub evaluation_id: String,
    pub policy: FailurePolicy,
    pub schema_digest: String,
    pub data_digest: String,
}

impl EvaluationContext {
    pub fn new(schema_text: &str, data_text: &str, policy: FailurePolicy) -> Self {
        Self {
            evaluation_id: short_id("eval"),
            policy,
            schema_digest: digest_prefix(schema_text),
            data_digest: digest_prefix(data_text),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.evaluation_id)
    }
}

/// `<prefix>-` followed by the first 8 characters of a v4 uuid.
pub fn short_id(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().to_string()[..8])
}

/// First [`DIGEST_PREFIX_LEN`] hex characters of the SHA-256 of `text`.
pub fn digest_prefix(text: &str) -> String {
    let digest = hex::encode(Sha256::digest(text.as_bytes()));
    digest[..DIGEST_PREFIX_LEN].to_string()
}
