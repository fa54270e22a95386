mod ledger;
mod member;
mod money;
mod tier;

pub use ledger::*;
pub use member::*;
pub use money::*;
pub use tier::*;
