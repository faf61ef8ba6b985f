use crate::enums::Tag;
use std::fmt;

/// Operation to act on confirmations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operation {
    /// Allow confirmation.
    Allow,
    /// Decline or cancel confirmation.
    Cancel,
}

impl Operation {
    /// The tag the confirmation key for this operation is generated with.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Allow => Tag::Allow,
            Self::Cancel => Tag::Cancel,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn signs_with_matching_tag() {
        assert_eq!(Operation::Allow.tag(), Tag::Allow);
        assert_eq!(Operation::Cancel.tag(), Tag::Cancel);
        assert_eq!(Operation::Cancel.to_string(), Operation::Cancel.tag().to_string());
    }
}
