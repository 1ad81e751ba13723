use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),
    #[error("invalid hashing cost: {0}")]
    Cost(argon2::Error),
    #[error("malformed password hash: {0}")]
    Verification(argon2::password_hash::Error),
}

/// Argon2id password hasher with a tunable iteration cost.
///
/// Hashes are PHC strings carrying their own salt and parameters, so
/// verification works regardless of the cost the hasher was built with.
pub struct Hasher(Argon2<'static>);

impl Hasher {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map(|params| Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
            .map(Self)
            .map_err(PasswordError::Cost)
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = salt()?;
        self.0
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(PasswordError::Hashing)
    }

    /// A wrong password is `Ok(false)`; only an unparseable hash is an error.
    pub fn verify(&self, hashword: &str, password: &str) -> Result<bool, PasswordError> {
        let hash = PasswordHash::new(hashword).map_err(PasswordError::Verification)?;
        match self.0.verify_password(password.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Verification(e)),
        }
    }
}

fn salt() -> Result<SaltString, PasswordError> {
    use rand::Rng;
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes).map_err(PasswordError::Hashing)
}
