//! Crate-wide result alias tying startup code to the server's error type.
//!
//! Bootstrap functions return `Result<T>`, which defaults the error parameter
//! to `ServerError`; request-path code names its stage error explicitly.
use crate::error::ServerError;

/// Convenient alias for `std::result::Result<T, ServerError>`.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
