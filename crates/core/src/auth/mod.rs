mod error;
mod functions;
mod requests;
mod types;
mod validation;

pub use error::{AuthError, Result};
#[cfg(feature = "auth")]
pub use functions::generate_token_key;
pub use functions::{build_claims, parse_authorization};
pub use requests::{LoginRequest, RefreshRequest, RegisterRequest};
pub use types::{ApiToken, Claims, Credential, NewUser, TokenPair, TokenType, User, UserSummary};
pub use validation::{validate_email, validate_registration, validate_username};
