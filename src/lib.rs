//! smartcalc
//!
//! Terminal calculator with a bounded history and on-demand step-by-step
//! explanations from a hosted text-generation service.
//!
//! Pure core (`model`, `parser`, `state`) and impure shell (`config`,
//! `explain`, `logging`, `view`).

pub mod config;
pub mod explain;
pub mod logging;
pub mod model;
pub mod parser;
pub mod state;
pub mod view;
