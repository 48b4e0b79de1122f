// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Kernel error types and the host-facing status codes.
//!
//! Inside the library, failures travel as [`KernelError`] values through
//! ordinary `Result` returns. At the boundary to the surrounding runtime,
//! they collapse into a [`KernelStatus`] code plus a log line — no
//! exception-like mechanism crosses the kernel boundary, and no partial
//! success value exists.

use compute_sched::SchedError;
use tensor_core::TensorError;

/// The fixed status enumeration the host runtime receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelStatus {
    /// Successful completion with fully written, well-formed output.
    Ok,
    /// Malformed or semantically inconsistent caller input: wrong arity,
    /// unsupported dtype, incompatible shapes, bad attributes. Detected
    /// before any output buffer is touched.
    ParamInvalid,
    /// An internal operation failed despite valid inputs. May surface
    /// after partial output has been written.
    InnerError,
}

impl KernelStatus {
    /// Returns a stable label for logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            KernelStatus::Ok => "OK",
            KernelStatus::ParamInvalid => "PARAM_INVALID",
            KernelStatus::InnerError => "INNER_ERROR",
        }
    }
}

impl std::fmt::Display for KernelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while validating or executing a kernel.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// Caller-input problem; maps to [`KernelStatus::ParamInvalid`].
    #[error("invalid parameter for {op}: {detail}")]
    ParamInvalid { op: String, detail: String },

    /// Internal invariant violation; maps to [`KernelStatus::InnerError`].
    #[error("internal error in {op}: {detail}")]
    Inner { op: String, detail: String },

    /// Tensor construction/access failure — a caller-input problem.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// Worker-pool failure — an environment problem, not the caller's.
    #[error("scheduler error: {0}")]
    Sched(#[from] SchedError),
}

impl KernelError {
    /// Builds a `ParamInvalid` error for operator `op`.
    pub fn param_invalid(op: &str, detail: impl Into<String>) -> Self {
        KernelError::ParamInvalid {
            op: op.to_string(),
            detail: detail.into(),
        }
    }

    /// Builds an `Inner` error for operator `op`.
    pub fn inner(op: &str, detail: impl Into<String>) -> Self {
        KernelError::Inner {
            op: op.to_string(),
            detail: detail.into(),
        }
    }

    /// Collapses this error into the host-facing status code.
    pub fn status(&self) -> KernelStatus {
        match self {
            KernelError::ParamInvalid { .. } | KernelError::Tensor(_) => {
                KernelStatus::ParamInvalid
            }
            KernelError::Inner { .. } | KernelError::Sched(_) => KernelStatus::InnerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::Shape;

    #[test]
    fn test_status_labels() {
        assert_eq!(KernelStatus::Ok.as_str(), "OK");
        assert_eq!(KernelStatus::ParamInvalid.as_str(), "PARAM_INVALID");
        assert_eq!(format!("{}", KernelStatus::InnerError), "INNER_ERROR");
    }

    #[test]
    fn test_error_to_status() {
        assert_eq!(
            KernelError::param_invalid("Add", "bad axis").status(),
            KernelStatus::ParamInvalid
        );
        assert_eq!(
            KernelError::inner("Cast", "copy failed").status(),
            KernelStatus::InnerError
        );
        let tensor_err: KernelError = TensorError::BroadcastIncompatible {
            lhs: Shape::vector(2),
            rhs: Shape::vector(3),
            dim: 0,
        }
        .into();
        assert_eq!(tensor_err.status(), KernelStatus::ParamInvalid);
    }

    #[test]
    fn test_error_messages_name_the_op() {
        let e = KernelError::param_invalid("GatherV2", "index 9 out of range");
        assert!(e.to_string().contains("GatherV2"));
        assert!(e.to_string().contains("index 9"));
    }
}
