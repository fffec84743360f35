//! Request-scoped state: the replayable ledger, its seal, and the component directory.

pub mod directory;
pub mod ledger;
pub mod seal;

pub use directory::{ComponentKey, Directory, Hook};
pub use ledger::{Ledger, LedgerEntry, LedgerError};
pub use seal::SealKey;
