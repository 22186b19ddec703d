pub mod area;
pub mod cli;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod metrics;
pub mod orchestrator;
pub mod scheduler;
pub mod types;
pub mod validator;
pub mod wave;

pub use error::BatchingError;
pub use generator::{BoxCatalog, WarehouseGenerator};
pub use ledger::StockLedger;
pub use metrics::MetricsCollector;
pub use orchestrator::BatchingOutcome;
pub use scheduler::{BatchingConfig, WAVE_CAPACITY};
pub use types::{BoxRecord, CaixaId, IterationLog, Position, Sku, Summary, WaveClass, WaveId};
pub use wave::Wave;
