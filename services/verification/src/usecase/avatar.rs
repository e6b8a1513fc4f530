use rand::RngExt;
use url::form_urlencoded::byte_serialize;

/// Supplies a placeholder avatar URL for a newly registered user.
pub trait AvatarProvider: Send + Sync {
    fn avatar_url(&self, first_name: &str, last_name: &str) -> String;
}

const USERNAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const RANDOM_USERNAME_LEN: usize = 12;

/// Placeholder avatars from an initials/document image service.
///
/// * first + last name: `{base}/initials?username=FL`
/// * first name only: `{base}/document?username=first`
/// * neither: `{base}/document?username=<random>`
#[derive(Debug, Clone)]
pub struct InitialsAvatar {
    base_url: String,
}

impl InitialsAvatar {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    fn url(&self, kind: &str, username: &str) -> String {
        let username: String = byte_serialize(username.as_bytes()).collect();
        format!("{}/{kind}?username={username}", self.base_url)
    }
}

fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn random_username() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_USERNAME_LEN)
        .map(|_| USERNAME_CHARSET[rng.random_range(0..USERNAME_CHARSET.len())] as char)
        .collect()
}

impl AvatarProvider for InitialsAvatar {
    fn avatar_url(&self, first_name: &str, last_name: &str) -> String {
        let first = first_name.trim();
        let last = last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => self.url("initials", &(initial(first) + &initial(last))),
            (false, true) => self.url("document", &first.to_lowercase()),
            _ => self.url("document", &random_username()),
        }
    }
}
