//! Enumerated types.

mod confirmation_type;
mod tag;

pub use confirmation_type::ConfirmationType;
pub use tag::Tag;
