//! # delve-core
//!
//! Core types shared by every delve crate:
//! - Depth levels and their fixed research settings
//! - The research request and the finding returned to the host
//! - Error envelopes emitted on the failure channel
//! - Validation of untyped values returned by the research engine

pub mod depth;
pub mod entities;
pub mod errors;
pub mod responses;
pub mod validate;

pub use depth::{DepthLevel, Settings, resolve};
pub use entities::{Finding, FindingMetadata, ResearchRequest, Source};
pub use errors::ValidationError;
pub use responses::ErrorEnvelope;
