//! `labelpick-recon`: warehouse order/label reconciliation engine.
//!
//! Pure engine crate: receives parsed order rows and a page-to-identifier
//! map, returns the picking order, the main/combined partition, a label-page
//! permutation, and diagnostics. No CLI or process dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod partition;
pub mod sort;
pub mod summary;

pub use config::{depots, NumberingMode, PickConfig};
pub use engine::{load_csv_rows, run};
pub use error::PickError;
pub use model::{PageMap, PickResult, RawOrder};
