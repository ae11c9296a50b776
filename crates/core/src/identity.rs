//! Shopper identity as supplied by the identity collaborator.
//!
//! Bazaar only reads a logged-in flag and a display name; signing in is the
//! identity provider's job, so [`Identity::login`] just flips the flag.

use serde::{Deserialize, Serialize};

/// Display name shown before the identity provider supplies one.
pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub logged_in: bool,
    pub display_name: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self::guest(GUEST_NAME)
    }
}

impl Identity {
    /// A signed-out shopper whose name will be shown after login.
    #[must_use]
    pub fn guest(display_name: impl Into<String>) -> Self {
        Self {
            logged_in: false,
            display_name: display_name.into(),
        }
    }

    pub fn login(&mut self) {
        self.logged_in = true;
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    /// Label for the account menu: the name when signed in, else "Account".
    #[must_use]
    pub fn account_label(&self) -> &str {
        if self.logged_in {
            &self.display_name
        } else {
            "Account"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_flips_flag() {
        let mut identity = Identity::guest("John Doe");
        assert_eq!(identity.account_label(), "Account");

        identity.login();
        assert!(identity.logged_in);
        assert_eq!(identity.account_label(), "John Doe");

        identity.logout();
        assert!(!identity.logged_in);
    }

    #[test]
    fn test_default_is_guest() {
        let identity = Identity::default();
        assert!(!identity.logged_in);
        assert_eq!(identity.display_name, GUEST_NAME);
    }
}
