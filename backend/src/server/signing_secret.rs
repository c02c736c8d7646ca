//! Token signing secret loading and fingerprinting.
//!
//! The secret is read from a file so it can be mounted by the orchestrator.
//! Operators compare the logged fingerprint across replicas; the secret
//! itself is never logged.

use std::io;
use std::path::{Path, PathBuf};

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum accepted secret length for HS256.
pub const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Errors raised while loading the signing secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("failed to read signing secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("signing secret at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Secret bytes, wiped on drop.
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First eight bytes of the SHA-256 digest as lowercase hex.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }

    fn ephemeral() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_LEN]);
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

/// Read the secret at `path`.
///
/// An unreadable file falls back to a random secret when `allow_ephemeral`
/// is set; tokens signed with it do not survive a restart. Trailing
/// whitespace is trimmed so files written with `echo` work.
///
/// # Errors
/// Fails when the file is unreadable and no fallback is allowed, or when the
/// secret is shorter than [`SECRET_MIN_LEN`].
pub fn load_signing_secret(
    path: &Path,
    allow_ephemeral: bool,
) -> Result<SigningSecret, SecretError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let mut bytes = Zeroizing::new(bytes);
            let trimmed = bytes.trim_ascii_end().len();
            bytes.truncate(trimmed);
            if bytes.len() < SECRET_MIN_LEN {
                return Err(SecretError::TooShort {
                    path: path.to_path_buf(),
                    length: bytes.len(),
                    min_len: SECRET_MIN_LEN,
                });
            }
            Ok(SigningSecret(bytes))
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary signing secret (dev only)"
            );
            Ok(SigningSecret::ephemeral())
        }
        Err(error) => Err(SecretError::Read {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn secret_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents).expect("write secret");
        file
    }

    #[rstest]
    fn reads_secret_and_trims_newline() {
        let file = secret_file(&[b"k".repeat(40).as_slice(), b"\n"].concat());

        let secret = load_signing_secret(file.path(), false).expect("secret loads");

        assert_eq!(secret.as_bytes().len(), 40);
    }

    #[rstest]
    fn short_secret_is_rejected_even_with_fallback() {
        let file = secret_file(b"too-short");

        let err = load_signing_secret(file.path(), true).err();

        assert!(matches!(
            err,
            Some(SecretError::TooShort { length: 9, .. })
        ));
    }

    #[rstest]
    #[case(false, false)]
    #[case(true, true)]
    fn missing_file_needs_fallback(#[case] allow_ephemeral: bool, #[case] loads: bool) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent");

        let result = load_signing_secret(&path, allow_ephemeral);

        assert_eq!(result.is_ok(), loads);
    }

    #[rstest]
    fn fingerprint_is_stable_hex() {
        let file = secret_file(&b"s".repeat(32));
        let secret = load_signing_secret(file.path(), false).expect("secret loads");

        let first = secret.fingerprint();

        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first, secret.fingerprint());
    }

    #[rstest]
    fn ephemeral_secrets_differ() {
        assert_ne!(
            SigningSecret::ephemeral().fingerprint(),
            SigningSecret::ephemeral().fingerprint()
        );
    }
}
