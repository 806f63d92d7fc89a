use serde::Deserialize;
use validator::Validate;

/// Credentials submitted by the login form.
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
