//! Error reporting hook used where a call violates an API contract

use crate::error::Classified;

/// Log a rejected operation and hand the error back for propagation
///
/// Typical use is `return Err(on_error("transform_bytes", err))`.
pub fn on_error<E>(operation: &str, error: E) -> E
where
    E: std::error::Error + Classified,
{
    tracing::warn!(
        operation,
        kind = %error.kind(),
        "rejected call: {error}"
    );
    error
}
