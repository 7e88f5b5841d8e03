//! Exit code constants for the promptml CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files)
//! - 2: Validation failure
//! - 3: Parse failure
//! - 4: Render failure
//! - 5: Conversion failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, malformed values file.
pub const USER_ERROR: i32 = 1;

/// Document validation failed.
pub const VALIDATION_FAILURE: i32 = 2;

/// XML could not be parsed into a document.
pub const PARSE_FAILURE: i32 = 3;

/// Rendering failed (missing required value, invalid document).
pub const RENDER_FAILURE: i32 = 4;

/// Serializing a document back to XML failed.
pub const CONVERSION_FAILURE: i32 = 5;
