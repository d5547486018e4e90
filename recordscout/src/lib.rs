pub mod config;
pub mod errors;
pub mod metrics;
pub mod record;
pub mod results;
pub mod search;
pub mod seed;
pub mod store;

pub use config::{Delays, EngineConfig, ExecutionMode};
pub use errors::{LookupError, LookupResult};
pub use metrics::ProcessReport;
pub use record::{NewRecord, Record};
pub use results::SearchOutput;
pub use search::{parse_id, RecordEngine};
pub use store::RecordStore;
