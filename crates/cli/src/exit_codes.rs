//! CLI Exit Code Registry
//!
//! Single source of truth for `auditdesk` exit codes. Schedulers and wrapper
//! scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success (NEEDS_REVIEW rows are still success)      |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (bad arguments, bad `--date`)          |
//! | 3    | Settings file invalid                              |
//! | 4    | Record store failure (missing file, failed lookup) |
//! | 5    | Ledger or report file failure                      |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unparseable values.
pub const EXIT_USAGE: u8 = 2;

/// Settings file unreadable, unparseable or failing validation.
pub const EXIT_CONFIG: u8 = 3;

/// Store could not be opened or a lookup failed. The run was aborted.
pub const EXIT_STORE: u8 = 4;

/// History ledger or report could not be read or written.
pub const EXIT_LEDGER_IO: u8 = 5;
