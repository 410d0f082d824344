pub mod config;
pub mod mock_llm;
