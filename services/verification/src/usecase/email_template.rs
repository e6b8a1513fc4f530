use crate::domain::types::EmailMessage;

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

const LOGO_URL: &str = "https://chowlocal.com/x/assets/images/chowlocallogo.png";

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the verification email for `to` carrying `code`.
pub fn verification_email(
    to: &str,
    first_name: Option<&str>,
    code: &str,
    ttl_minutes: i64,
) -> EmailMessage {
    let greeting = match first_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hello {},", escape_html(name)),
        None => "Hello,".to_owned(),
    };

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="text-align: center; margin-bottom: 30px;">
    <img src="{LOGO_URL}" alt="ChowLocal" style="width: 80px; height: auto;">
  </div>
  <h1 style="color: #333; text-align: center; margin-bottom: 30px;">Verify Your Email Address</h1>
  <p style="color: #666; font-size: 16px; line-height: 1.5; margin-bottom: 20px;">{greeting}</p>
  <p style="color: #666; font-size: 16px; line-height: 1.5; margin-bottom: 30px;">
    Thank you for signing up! Please use the verification code below to complete your registration:
  </p>
  <div style="background-color: #f5f5f5; border: 2px dashed #ccc; border-radius: 8px; padding: 20px; text-align: center; margin-bottom: 30px;">
    <span style="font-size: 24px; font-weight: bold; color: #333; letter-spacing: 4px;">{code}</span>
  </div>
  <p style="color: #666; font-size: 14px; line-height: 1.5; margin-bottom: 20px;">
    This code will expire in {ttl_minutes} minutes for security reasons.
  </p>
  <p style="color: #666; font-size: 14px; line-height: 1.5;">
    If you didn't create an account with us, you can safely ignore this email.
  </p>
  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
  <p style="color: #999; font-size: 12px; text-align: center;">
    This email was sent by ChowLocal. Please do not reply to this email.
  </p>
</div>"#
    );

    EmailMessage {
        to: to.to_owned(),
        subject: VERIFICATION_SUBJECT.to_owned(),
        html,
    }
}
