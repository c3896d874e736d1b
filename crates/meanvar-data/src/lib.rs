//! # Meanvar Data
//!
//! Price history providers for the Meanvar analytics engine.
//!
//! This crate provides:
//! - The async [`PriceHistoryProvider`] trait
//! - A Yahoo Finance source (feature `yahoo`, on by default)
//! - A CSV source reading `<dir>/<TICKER>.csv` files with `date,close` columns
//! - An in-memory source for tests and demos
//! - [`PairAnalyzer`], which fetches two tickers concurrently and runs the engine
//!
//! Every provider failure reaches the engine as `DataUnavailable`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analyzer;
mod csv_source;
mod error;
mod memory;
mod provider;
#[cfg(feature = "yahoo")]
mod yahoo;

pub use analyzer::PairAnalyzer;
pub use csv_source::{parse_closes, CsvPriceSource};
pub use error::{DataError, DataResult};
pub use memory::InMemoryPriceSource;
pub use provider::{HistoryRequest, PriceHistoryProvider, SourceKind};
#[cfg(feature = "yahoo")]
pub use yahoo::YahooPriceSource;

use std::path::Path;
use std::sync::Arc;

/// Create a provider of the given kind.
///
/// `data_dir` is required for [`SourceKind::Csv`]. [`SourceKind::Memory`]
/// yields an empty source.
pub fn create_provider(
    kind: SourceKind,
    data_dir: Option<&Path>,
) -> DataResult<Arc<dyn PriceHistoryProvider>> {
    match kind {
        #[cfg(feature = "yahoo")]
        SourceKind::Yahoo => Ok(Arc::new(YahooPriceSource::new()?)),
        #[cfg(not(feature = "yahoo"))]
        SourceKind::Yahoo => Err(DataError::InvalidRequest(
            "built without Yahoo Finance support".to_string(),
        )),
        SourceKind::Csv => {
            let dir = data_dir.ok_or_else(|| {
                DataError::InvalidRequest("CSV source needs a data directory".to_string())
            })?;
            if !dir.is_dir() {
                return Err(DataError::Io(format!(
                    "data directory {} does not exist",
                    dir.display()
                )));
            }
            Ok(Arc::new(CsvPriceSource::new(dir)))
        }
        SourceKind::Memory => Ok(Arc::new(InMemoryPriceSource::new())),
    }
}
