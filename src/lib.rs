#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod media;
pub mod persona;
pub mod prompt;

pub use chat::{ChatDispatcher, ChatReply, ChatRequest};
pub use config::Config;
pub use error::{BackendError, ChatError, DispatchError, FileProcessingError};
