pub mod classifier;
pub mod diff;
pub mod files;
pub mod impact;
pub mod issue;
pub mod line_classifier;
pub mod semantics;
