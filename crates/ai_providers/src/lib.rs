//! AI provider clients for SensAble
//!
//! Thin HTTP clients for the external services every endpoint delegates to:
//!
//! - `ChatClient` - OpenAI chat completions (conversation + environment analysis)
//! - `VisionClient` - OpenAI vision descriptions for uploaded images
//! - `ImageClient` - DALL-E image generation with a bounded two-tier attempt
//! - `FalImageClient` - Fal.ai Stable Diffusion XL image generation
//! - `SpeechClient` - Whisper transcription and TTS synthesis
//!
//! Clients translate normalized requests into the provider wire format and
//! translate responses back. They never substitute fallback content: any
//! network failure, non-success status, or malformed response surfaces as a
//! [`ProviderError`] for the route handler to recover from.

pub mod chat;
pub mod config;
pub mod error;
pub mod image;
pub mod speech;
pub mod vision;

pub use chat::{ChatClient, ChatCompletion, Usage};
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use image::{FalImageClient, GeneratedImage, ImageClient};
pub use speech::{SpeechClient, Transcription};
pub use vision::VisionClient;
