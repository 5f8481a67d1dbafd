use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::NaiveDateTime;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use daybook_db::Database;
use daybook_types::User;

use crate::error::Error;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive a fresh salted hash for `password`.
///
/// Stored form is `base64(salt || key)`: a random 16-byte salt followed by
/// the 32-byte PBKDF2-HMAC-SHA256 key at 100 000 iterations.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut key);

    let mut stored = [0u8; SALT_LEN + KEY_LEN];
    stored[..SALT_LEN].copy_from_slice(&salt);
    stored[SALT_LEN..].copy_from_slice(&key);
    BASE64.encode(stored)
}

/// Check `password` against a stored hash. The key comparison is constant
/// time; a malformed stored value counts as a mismatch, never an error.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(decoded) = BASE64.decode(stored) else {
        return false;
    };
    if decoded.len() != SALT_LEN + KEY_LEN {
        return false;
    }
    let (salt, key) = decoded.split_at(SALT_LEN);

    let mut candidate = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut candidate);

    key.ct_eq(&candidate).into()
}

/// Owns user records: registration and password verification.
pub struct CredentialStore {
    db: Arc<Database>,
}

impl CredentialStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new user. An existing username is never overwritten.
    pub fn create_user(&self, username: &str, password: &str) -> Result<(), Error> {
        if self.db.get_user_by_username(username)?.is_some() {
            return Err(Error::UsernameTaken);
        }

        self.db.insert_user(username, &hash_password(password))?;
        Ok(())
    }

    /// True when `password` matches the stored hash for `username`. An
    /// unknown username verifies as false, indistinguishable from a wrong
    /// password.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, Error> {
        match self.db.get_user_by_username(username)? {
            Some(row) => Ok(verify_password(password, &row.password_hash)),
            None => Ok(false),
        }
    }

    /// Verify credentials and return the user's profile. Unknown username
    /// and wrong password fold into the same failure.
    pub fn login(&self, username: &str, password: &str) -> Result<User, Error> {
        let Some(row) = self.db.get_user_by_username(username)? else {
            return Err(Error::AuthenticationFailed);
        };
        if !verify_password(password, &row.password_hash) {
            return Err(Error::AuthenticationFailed);
        }

        let created_at = NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| anyhow::anyhow!("malformed created_at for {username}: {e}"))?
            .and_utc();

        Ok(User {
            username: row.username,
            created_at,
        })
    }
}
