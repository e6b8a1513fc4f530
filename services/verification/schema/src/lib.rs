pub mod email_verification_codes;
pub mod profiles;
