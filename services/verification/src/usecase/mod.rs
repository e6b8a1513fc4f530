pub mod autocomplete;
pub mod avatar;
pub mod email_template;
pub mod issue;
pub mod redeem;
