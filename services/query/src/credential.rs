use awsig_core::time::{now, DateTime};
use awsig_core::utils::Redact;
use awsig_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access_key and secret_key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for aws services.
    pub access_key_id: String,
    /// Secret access key for aws services.
    pub secret_access_key: String,
    /// Session token for temporary aws credentials.
    pub session_token: Option<String>,
    /// Expiration time for this credential.
    pub expires_in: Option<DateTime>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return false;
        }
        // Take 120s as buffer to avoid edge cases.
        if let Some(valid) = self
            .expires_in
            .map(|v| v > now() + chrono::TimeDelta::try_minutes(2).expect("in bounds"))
        {
            return valid;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credential_is_invalid() {
        assert!(!Credential::default().is_valid());
        assert!(!Credential {
            access_key_id: "akid".to_string(),
            ..Default::default()
        }
        .is_valid());
    }

    #[test]
    fn test_unexpired_credential_is_valid() {
        let cred = Credential {
            access_key_id: "akid".to_string(),
            secret_access_key: "secret".to_string(),
            ..Default::default()
        };
        assert!(cred.is_valid());
    }

    #[test]
    fn test_expired_credential_is_invalid() {
        let cred = Credential {
            access_key_id: "akid".to_string(),
            secret_access_key: "secret".to_string(),
            expires_in: Some(now() - chrono::TimeDelta::try_minutes(1).expect("in bounds")),
            ..Default::default()
        };
        assert!(!cred.is_valid());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential {
            access_key_id: "AKIDEXAMPLEKEY".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            ..Default::default()
        };
        let printed = format!("{cred:?}");
        assert!(!printed.contains("wJalrXUtnFEMI"));
        assert!(printed.contains("AKI***KEY"));
    }
}
