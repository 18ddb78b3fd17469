//! The shape a transport hands back to callers.

use crate::order_actor::{ErrorKind, OrderError};
use serde::Serialize;
use tracing::error;

const GENERIC_FAILURE: &str = "Could not complete the request.";

/// `{ ok, error, kind, data }`, built from a service result.
///
/// Domain failures keep their message. Infrastructure failures are logged
/// here and replaced by a generic message so internals never reach callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreOutput<T> {
    pub ok: bool,
    pub error: Option<String>,
    pub kind: Option<ErrorKind>,
    pub data: Option<T>,
}

impl<T> CoreOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            error: None,
            kind: None,
            data: Some(data),
        }
    }

    pub fn failure(err: &OrderError) -> Self {
        let kind = err.kind();
        let message = if kind == ErrorKind::Infrastructure {
            error!(error = %err, "Request failed");
            GENERIC_FAILURE.to_string()
        } else {
            err.to_string()
        };
        Self {
            ok: false,
            error: Some(message),
            kind: Some(kind),
            data: None,
        }
    }
}

impl<T> From<Result<T, OrderError>> for CoreOutput<T> {
    fn from(result: Result<T, OrderError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;

    #[test]
    fn test_success_envelope() {
        let output = CoreOutput::from(Ok::<_, OrderError>(OrderId(4)));
        assert!(output.ok);
        assert_eq!(output.data, Some(OrderId(4)));
        assert!(output.error.is_none());
    }

    #[test]
    fn test_domain_failure_keeps_message() {
        let output: CoreOutput<OrderId> =
            Err(OrderError::Conflict("This order already has a driver.".into())).into();
        assert!(!output.ok);
        assert_eq!(output.kind, Some(ErrorKind::Conflict));
        assert!(output.error.unwrap().contains("already has a driver"));
    }

    #[test]
    fn test_infrastructure_failure_is_generic() {
        let output: CoreOutput<OrderId> =
            Err(OrderError::StoreUnavailable("Actor closed".into())).into();
        assert_eq!(output.kind, Some(ErrorKind::Infrastructure));
        assert_eq!(output.error.as_deref(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn test_serialized_shape() {
        let output: CoreOutput<OrderId> = Err(OrderError::OrderNotFound(OrderId(9))).into();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["kind"], "NotFound");
        assert!(json["data"].is_null());
    }
}
