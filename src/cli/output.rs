//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Exit status for errors caused by the request itself.
pub const EXIT_USER_ERROR: i32 = 1;
/// Exit status for storage, configuration and terminal failures.
pub const EXIT_FAILURE: i32 = 2;

/// Map domain/service errors to the line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    format!("Error: {}", e)
}

pub fn exit_code(e: &ApiError) -> i32 {
    if e.is_user_error() {
        EXIT_USER_ERROR
    } else {
        EXIT_FAILURE
    }
}
