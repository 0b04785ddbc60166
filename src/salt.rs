//! Injectable sources of name salts.

use crate::types::Salt;

pub trait SaltSource {
    fn next_salt(&mut self) -> Salt;
}

/// Always returns the same salt. For tests and for re-deriving a
/// commitment from a stored salt.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt(pub Salt);

impl SaltSource for FixedSalt {
    fn next_salt(&mut self) -> Salt {
        self.0
    }
}

/// 256 random bits from the operating system.
#[cfg(feature = "rng")]
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSalt;

#[cfg(feature = "rng")]
impl SaltSource for OsSalt {
    fn next_salt(&mut self) -> Salt {
        use rand::RngCore;

        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Salt(bytes)
    }
}
