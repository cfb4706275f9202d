#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod huggingface;
pub mod retry;
pub mod wikipedia;
pub mod zhipu;

pub use huggingface::{HuggingFaceAnswerModel, HuggingFaceConfig};
pub use retry::{delays_from_secs, retry_with_backoff};
pub use wikipedia::{WikipediaClient, WikipediaConfig};
pub use zhipu::{ZhipuAnswerModel, ZhipuConfig};
