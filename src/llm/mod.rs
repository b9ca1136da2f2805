//! LLM client layer - the text-generation collaborator boundary.
//!
//! This module provides:
//! - Message types for LLM communication
//! - The LlmClient trait for API abstraction
//! - The AnthropicClient implementation
//! - A scripted MockLlmClient for deterministic tests

pub mod anthropic;
pub mod client;
pub mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, LlmError, MockLlmClient};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};
