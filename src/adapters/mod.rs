// Adapters layer: concrete implementations of the domain ports (HTTP providers and their table).

pub mod http;
pub mod provider_table;

pub use http::HttpProvider;
pub use provider_table::{default_providers, FieldMapping, ProviderSpec};
