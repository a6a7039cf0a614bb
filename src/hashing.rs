use std::fmt::Display;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::{Error, Result};

pub const HASH_BYTE_LEN: usize = 20;
pub const HASH_HEX_LEN: usize = 40;

/// A 160 bit content digest, displayed as 40 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_BYTE_LEN]);

impl Hash {
    /// The all-zero digest, only ever used to mean "no parent".
    pub const ZERO: Hash = Hash([0; HASH_BYTE_LEN]);

    /// Returns the SHA1 hash for the data passed
    pub fn new(value: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(value);
        Hash(hasher.finalize().into())
    }

    pub fn is_zero(&self) -> bool {
        *self == Hash::ZERO
    }
}

impl From<[u8; HASH_BYTE_LEN]> for Hash {
    fn from(value: [u8; HASH_BYTE_LEN]) -> Self {
        Hash(value)
    }
}

impl FromStr for Hash {
    type Err = Error;

    /// Parses a 40 character hexadecimal string into a hash.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != HASH_HEX_LEN {
            return Err(Error::invalid(format!(
                "hash must be {} hexadecimal characters, got {}",
                HASH_HEX_LEN,
                s.len()
            )));
        }
        let bytes: [u8; HASH_BYTE_LEN] = hex::decode(s)
            .map_err(|_| Error::invalid(format!("{s:?} is not a hexadecimal string")))?
            .try_into()
            .expect("decoded hex of checked length always fits");
        Ok(Hash(bytes))
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(hex::encode(self.as_ref()).as_str())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Tests
