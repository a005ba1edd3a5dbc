//! External label prediction.
//!
//! Lensmatch does no inference itself. A [`LabelPredictor`] stands in for the
//! image classifier, and [`LazyPredictor`] owns its lifecycle: load on first
//! use, exactly once, until disposed.

pub mod http;
pub mod lazy;
pub mod predictor;
pub mod retry;
pub mod sidecar;

pub use http::{HttpLoader, HttpPredictor};
pub use lazy::LazyPredictor;
pub use predictor::{
    create_loader, normalize, parse_predictions, FixedPredictor, LabelPredictor, PredictorLoader,
};
pub use sidecar::SidecarPredictor;
