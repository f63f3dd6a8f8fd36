//! Interfaces to external collaborators. The pipeline only ever sees
//! these traits; transports and storage engines live behind them.

mod closure_store;
mod embedding;
mod llm;
mod telemetry;

pub use closure_store::IClosureStore;
pub use embedding::IEmbeddingProvider;
pub use llm::ILlmClient;
pub use telemetry::ITelemetryStore;
