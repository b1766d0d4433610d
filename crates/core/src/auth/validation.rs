use super::{AuthError, RegisterRequest, Result};

const MAX_USERNAME_LEN: usize = 150;

/// Validates a username: 1..=150 characters of letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(AuthError::MissingField("username"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AuthError::InvalidUsername(format!(
            "at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if let Some(c) = username
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(AuthError::InvalidUsername(format!(
            "character {c:?} is not allowed"
        )));
    }
    Ok(())
}

/// Minimal email shape check: one `@` with non-empty local and domain parts.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(AuthError::InvalidEmail(email.to_string())),
    }
}

/// Validates a registration payload before any storage lookups.
pub fn validate_registration(request: &RegisterRequest) -> Result<()> {
    validate_username(&request.username)?;
    if request.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    validate_email(&request.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration(&request("ali.valiev", "s3cret", "ali@example.uz")).is_ok());
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            validate_registration(&request("", "pw", "a@b.uz")),
            Err(AuthError::MissingField("username"))
        );
        assert_eq!(
            validate_registration(&request("ali", "", "a@b.uz")),
            Err(AuthError::MissingField("password"))
        );
        assert_eq!(
            validate_registration(&request("ali", "pw", "")),
            Err(AuthError::MissingField("email"))
        );
    }

    #[test]
    fn rejects_bad_username_characters() {
        assert!(matches!(
            validate_username("ali valiev"),
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(matches!(
            validate_username(&"a".repeat(151)),
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(validate_username("user+tag@site.uz").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(matches!(
            validate_email("not-an-email"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            validate_email("a@b@c"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(validate_email("@b.uz"), Err(AuthError::InvalidEmail(_))));
    }
}
