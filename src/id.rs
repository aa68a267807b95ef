//! Short random identifiers for new records.

/// Length of generated ids.
pub const ID_LENGTH: usize = 8;

/// URL-safe unreserved characters, 64 of them.
pub const ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of ids for newly created records.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniformly random ids drawn from [`ID_ALPHABET`].
#[derive(Debug, Clone, Copy)]
pub struct RandomIds {
    length: usize,
}

impl RandomIds {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new(ID_LENGTH)
    }
}

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        (0..self.length)
            .map(|_| ID_ALPHABET[fastrand::usize(..ID_ALPHABET.len())] as char)
            .collect()
    }
}
