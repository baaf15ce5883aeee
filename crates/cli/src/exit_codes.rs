//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                                   |
//! |-------|-----------|-----------------------------------------------|
//! | 0     | Universal | Success                                       |
//! | 1     | Universal | General error (unspecified)                   |
//! | 2     | Universal | CLI usage error (bad args, unknown depot)     |
//! | 3-9   | pick      | Reconciliation-specific codes                 |

/// Success: command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error, unspecified. Avoid; prefer a specific code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error: bad arguments, unknown depot name.
pub const EXIT_USAGE: u8 = 2;

/// Reconciliation ran but left unmatched rows or unclaimed pages.
/// Like `diff(1)`, a non-zero exit means "the two sides differ."
pub const EXIT_PICK_UNMATCHED: u8 = 3;

/// Nothing to reconcile: no usable order rows, or no page matched at all.
pub const EXIT_PICK_EMPTY: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_PICK_INVALID_CONFIG: u8 = 5;

/// IO error (file read/write, pdftotext invocation).
pub const EXIT_IO_ERROR: u8 = 6;

/// Input parse error (orders CSV shape, label text extraction).
pub const EXIT_PARSE_ERROR: u8 = 7;
