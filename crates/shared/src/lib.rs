pub mod domain;
pub mod error;
pub mod protocol;
pub mod record;

pub use lifecycle::{ProjectLifecycle, Stage, StagePanel};
