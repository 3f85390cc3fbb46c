pub mod presenter;

pub use presenter::{render, OutputFormat};
