use auth::PasswordHasher;

use crate::config::VerifierKind;
use crate::domain::user::errors::CredentialError;
use crate::domain::user::ports::CredentialVerifier;

const DECOY_CREDENTIAL: &str = "decoy-credential-never-matches";

/// Compares against a plaintext reference in constant time.
#[derive(Debug, Default)]
pub struct PlaintextCredentialVerifier;

impl CredentialVerifier for PlaintextCredentialVerifier {
    fn verify(&self, supplied: &str, reference: &str) -> Result<bool, CredentialError> {
        Ok(auth::constant_time_eq(
            supplied.as_bytes(),
            reference.as_bytes(),
        ))
    }

    fn verify_decoy(&self, supplied: &str) {
        let _ = self.verify(supplied, DECOY_CREDENTIAL);
    }
}

/// Verifies against an Argon2 PHC string reference.
pub struct Argon2CredentialVerifier {
    hasher: PasswordHasher,
    /// Hash with the same parameters as real references, checked for unknown users
    decoy_reference: String,
}

impl Argon2CredentialVerifier {
    /// # Errors
    /// * `VerificationFailed` - Decoy reference could not be hashed
    pub fn new() -> Result<Self, CredentialError> {
        let hasher = PasswordHasher::new();
        let decoy_reference = hasher.hash(DECOY_CREDENTIAL)?;
        Ok(Self {
            hasher,
            decoy_reference,
        })
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify(&self, supplied: &str, reference: &str) -> Result<bool, CredentialError> {
        Ok(self.hasher.verify(supplied, reference)?)
    }

    fn verify_decoy(&self, supplied: &str) {
        let _ = self.hasher.verify(supplied, &self.decoy_reference);
    }
}

/// Verifier selected by `directory.verifier` at startup.
pub enum ConfiguredCredentialVerifier {
    Plaintext(PlaintextCredentialVerifier),
    Argon2(Argon2CredentialVerifier),
}

impl ConfiguredCredentialVerifier {
    pub fn from_kind(kind: VerifierKind) -> Result<Self, CredentialError> {
        Ok(match kind {
            VerifierKind::Plaintext => Self::Plaintext(PlaintextCredentialVerifier),
            VerifierKind::Argon2 => Self::Argon2(Argon2CredentialVerifier::new()?),
        })
    }
}

impl CredentialVerifier for ConfiguredCredentialVerifier {
    fn verify(&self, supplied: &str, reference: &str) -> Result<bool, CredentialError> {
        match self {
            Self::Plaintext(verifier) => verifier.verify(supplied, reference),
            Self::Argon2(verifier) => verifier.verify(supplied, reference),
        }
    }

    fn verify_decoy(&self, supplied: &str) {
        match self {
            Self::Plaintext(verifier) => verifier.verify_decoy(supplied),
            Self::Argon2(verifier) => verifier.verify_decoy(supplied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_verifier() {
        let verifier = ConfiguredCredentialVerifier::from_kind(VerifierKind::Plaintext).unwrap();

        assert_eq!(verifier.verify("123", "123"), Ok(true));
        assert_eq!(verifier.verify("wrong", "123"), Ok(false));
        assert_eq!(verifier.verify("", "123"), Ok(false));
    }

    #[test]
    fn test_argon2_verifier() {
        let reference = PasswordHasher::new().hash("123").unwrap();
        let verifier = ConfiguredCredentialVerifier::from_kind(VerifierKind::Argon2).unwrap();

        assert_eq!(verifier.verify("123", &reference), Ok(true));
        assert_eq!(verifier.verify("wrong", &reference), Ok(false));
    }

    #[test]
    fn test_argon2_verifier_rejects_plaintext_reference() {
        let verifier = ConfiguredCredentialVerifier::from_kind(VerifierKind::Argon2).unwrap();

        let result = verifier.verify("123", "123");
        assert!(matches!(result, Err(CredentialError::VerificationFailed(_))));
    }

    #[test]
    fn test_argon2_decoy_reference_is_a_real_hash() {
        let verifier = Argon2CredentialVerifier::new().unwrap();

        assert_eq!(verifier.verify(DECOY_CREDENTIAL, &verifier.decoy_reference), Ok(true));
        assert!(verifier.decoy_reference.starts_with("$argon2"));
        verifier.verify_decoy("123");
    }
}
