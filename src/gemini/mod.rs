//! Gemini Integration
//!
//! Transport for Google's Gemini `generateContent` endpoint with the
//! `googleSearch` grounding tool.
//!
//! ## Architecture
//!
//! - **GroundedModel**: trait seam the verification client talks to
//! - **GeminiClient**: REST implementation of [`GroundedModel`]
//!
//! ## Data Flow
//!
//! 1. A caller builds a [`GroundedPrompt`] (system instruction, user text,
//!    temperature, grounding flag)
//! 2. The client posts it as a `generateContent` request
//! 3. The first candidate's text parts and grounding chunks come back as a
//!    [`GroundedReply`]

mod client;

pub use client::{
    Citation, GeminiClient, GeminiConfig, GeminiError, GroundedModel, GroundedPrompt,
    GroundedReply,
};
