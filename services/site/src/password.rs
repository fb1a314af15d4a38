use anyhow::Context;

/// bcrypt work factor for stored credentials.
pub const BCRYPT_COST: u32 = 12;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, BCRYPT_COST).context("bcrypt hash failed")
}

/// `Ok(false)` is a wrong password; `Err` means the stored hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(plain, hash).context("bcrypt verify failed")
}
