// Application layer: the ledger aggregate and the values it hands back.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
