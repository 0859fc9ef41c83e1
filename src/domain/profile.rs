use serde::{Deserialize, Serialize};

/// The signed-in shopper. Session scoped; nothing survives a restart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl UserProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Profile returned by the mock email login.
    pub fn demo(email: impl Into<String>) -> Self {
        Self::new("Demo User", email, "555-0123", "123 Street Food Ave")
    }

    /// Profile returned by the mock Google login.
    pub fn google() -> Self {
        Self::new("Google User", "user@gmail.com", "", "")
    }
}
