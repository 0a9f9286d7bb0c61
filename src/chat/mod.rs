pub mod data_url;
pub mod dispatcher;
pub mod intent;
pub mod shape;
pub mod types;

pub use data_url::{InlineImage, parse_data_url};
pub use dispatcher::{ChatDispatcher, failure_message};
pub use intent::{IntentClassifier, KeywordIntentClassifier};
pub use shape::{RequestShape, file_label};
pub use types::{ChatReply, ChatRequest, ConversationMessage, Role};
