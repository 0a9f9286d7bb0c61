mod core;
mod gateway;
mod llm;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use llm::LlmConfig;
