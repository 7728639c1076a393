pub mod providers;

pub use providers::{ExplanationProvider, ProviderError};
