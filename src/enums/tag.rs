use strum_macros::{Display, EnumString};

/// Tag used when generating a confirmation key. Steam checks that the key was generated for the
/// same tag that is sent with the request.
#[derive(Display, EnumString, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    /// Listing confirmations.
    Conf,
    /// Getting the details of a confirmation.
    Details,
    /// Allowing confirmations.
    Allow,
    /// Cancelling confirmations.
    Cancel,
}
