//! Error handling utilities for MCP server

use flowin_core::{ErrorKind, PlannerError};
use log::error;
use rmcp::ErrorData;

/// Converts a planner error into an MCP error.
///
/// Caller mistakes keep their message so the model can correct the call.
/// Internal failures are logged and reported without detail.
pub fn to_mcp_error(context: &str, err: PlannerError) -> ErrorData {
    match err.kind() {
        ErrorKind::NotFound => ErrorData::resource_not_found(err.to_string(), None),
        ErrorKind::BadRequest => ErrorData::invalid_params(err.to_string(), None),
        ErrorKind::Unauthorized => ErrorData::invalid_request(err.to_string(), None),
        ErrorKind::Internal => {
            error!("{context}: {err}");
            ErrorData::internal_error("Internal error", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_caller_errors_keep_message() {
        let err = to_mcp_error("Failed to get task", PlannerError::not_found("Task", 7));
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(err.message.contains('7'));

        let err = to_mcp_error(
            "Failed to create task",
            PlannerError::invalid_input("title").with_reason("must not be empty"),
        );
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let err = to_mcp_error(
            "Failed to list tasks",
            PlannerError::internal("disk on fire at /var/lib"),
        );
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Internal error");
    }
}
