use rand::Rng;

/// Generate a 6-digit one-time code, uniform in [100000, 999999].
///
/// Used for both the mobile-login OTP and the password-reset code.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}
