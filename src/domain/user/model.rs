/// A registered user together with the credentials of the external
/// OAuth-style integration it belongs to.
///
/// `password` is stored and compared as plaintext. This is a known defect
/// of the stored data format: nothing in this crate hashes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub tenant_url: String,
    pub organization: String,
}

impl User {
    /// Plain string equality against the stored password.
    ///
    /// Not constant-time and not hashed.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
