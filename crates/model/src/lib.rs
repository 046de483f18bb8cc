//! # MycoRisk Model
//!
//! The classifier capability consumed by the scoring core.
//!
//! This crate owns everything about the pre-trained model artifact:
//! - The [`Classifier`] trait, the only contract the rest of the system
//!   depends on (a single two-class probability prediction per feature row)
//! - The on-disk artifact format for the gradient-boosted tree ensemble
//!   produced by the external training pipeline
//! - Loading with structural validation, so evaluation can never panic
//!
//! **No clinical concerns**: field semantics, domain validation and risk
//! tiers belong in `mycorisk-core`. This crate sees only numbered features.

pub mod artifact;
pub mod classifier;
pub mod error;

pub use artifact::GbtClassifier;
pub use classifier::{Classifier, POSITIVE_CLASS};
pub use error::{ModelError, ModelResult};
