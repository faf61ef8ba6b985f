//! Models for responses.

mod confirmation;

pub use confirmation::Confirmation;
