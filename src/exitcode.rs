//! Standard exit codes (BSD sysexits.h compatible)

/// Data format error (malformed decision tree)
pub const DATAERR: i32 = 65;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;

/// Terminated by Ctrl+C (128 + SIGINT)
pub const INTERRUPTED: i32 = 130;
