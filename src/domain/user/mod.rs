//! User domain
//!
//! Account entity, sign-up rules and the repository trait used by the
//! persistence gateways.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserSummary};
pub use repository::UserRepository;
pub use validation::{
    parse_dob, validate_dob, validate_dob_today, validate_password, UserValidationError, DOB_FORMAT,
    MIN_AGE_YEARS, MIN_PASSWORD_LENGTH,
};
