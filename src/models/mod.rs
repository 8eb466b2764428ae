pub mod classification;
pub mod diff;
pub mod impact;
pub mod issue;
pub mod request;
pub mod response;
pub mod semantics;
