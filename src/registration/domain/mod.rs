//! Domain types for registration codes.
//!
//! Every type here is validated on construction, so a value that exists is a
//! value that passed its format and range rules.

mod age_group;
mod code_type;
mod details;
mod error;
mod season;
mod team_name;

pub use age_group::AgeGroup;
pub use code_type::CodeType;
pub use details::ParsedCodeDetails;
pub use error::CodeFormatError;
pub use season::Season;
pub use team_name::TeamName;
