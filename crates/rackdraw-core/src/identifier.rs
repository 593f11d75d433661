//! Cell identifier generation.
//!
//! Every rack, device and marker cell in a draw.io page needs an `id` that is
//! unique within the file. Identifiers are a caller-supplied prefix followed
//! by an underscore and an 8-character alphanumeric token:
//!
//! ```text
//! rack_00000001
//! server_0000000a
//! view_center_k3Xz9QpL
//! ```
//!
//! The token comes from an [`IdGenerator`] owned by a single builder. The
//! [`IdScheme`] selects how tokens are produced.

use std::{collections::HashSet, fmt};

use log::trace;
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;

/// Length of the alphanumeric token appended to every identifier prefix.
pub const TOKEN_LEN: usize = 8;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Strategy used by [`IdGenerator`] to produce tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Zero-padded base-36 counter. Deterministic and unique per generator.
    #[default]
    Sequential,
    /// Random ASCII alphanumerics, re-drawn on collision with an issued token.
    Random,
}

/// A generated cell identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellId(String);

impl CellId {
    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CellId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<CellId> for String {
    fn from(id: CellId) -> Self {
        id.0
    }
}

/// Produces unique [`CellId`]s for one document.
///
/// # Examples
///
/// ```
/// use rackdraw_core::identifier::{IdGenerator, IdScheme};
///
/// let mut ids = IdGenerator::new(IdScheme::Sequential);
/// assert_eq!(ids.next_id("rack"), "rack_00000001");
/// assert_eq!(ids.next_id("server"), "server_00000002");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    scheme: IdScheme,
    counter: u64,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            counter: 0,
            issued: HashSet::new(),
        }
    }

    /// Generates the next identifier as `{prefix}_{token}`.
    pub fn next_id(&mut self, prefix: &str) -> CellId {
        let token = match self.scheme {
            IdScheme::Sequential => {
                self.counter += 1;
                base36_token(self.counter)
            }
            IdScheme::Random => self.unique_random_token(),
        };
        CellId(format!("{prefix}_{token}"))
    }

    fn unique_random_token(&mut self) -> String {
        let mut rng = rand::rng();
        loop {
            let token: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(TOKEN_LEN)
                .map(char::from)
                .collect();
            if self.issued.insert(token.clone()) {
                return token;
            }
            trace!(token; "Random identifier collided, drawing again");
        }
    }
}

/// Encodes `value` as a zero-padded base-36 string of [`TOKEN_LEN`] digits.
///
/// Values beyond `36^8 - 1` keep their extra leading digits rather than being
/// truncated, so uniqueness holds for any counter value.
fn base36_token(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(TOKEN_LEN);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    while digits.len() < TOKEN_LEN {
        digits.push(b'0');
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_counted() {
        let mut ids = IdGenerator::new(IdScheme::Sequential);
        assert_eq!(ids.next_id("rack"), "rack_00000001");
        assert_eq!(ids.next_id("view_center"), "view_center_00000002");
        assert_eq!(ids.next_id("server"), "server_00000003");
    }

    #[test]
    fn test_base36_token() {
        assert_eq!(base36_token(0), "00000000");
        assert_eq!(base36_token(35), "0000000z");
        assert_eq!(base36_token(36), "00000010");
        assert_eq!(base36_token(36u64.pow(8)), "100000000");
    }

    #[test]
    fn test_random_ids_have_alphanumeric_token() {
        let mut ids = IdGenerator::new(IdScheme::Random);
        let id = ids.next_id("router");
        let token = id.as_str().strip_prefix("router_").unwrap();

        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_ids_are_unique() {
        let mut ids = IdGenerator::new(IdScheme::Random);
        let issued: HashSet<CellId> = (0..2000).map(|_| ids.next_id("x")).collect();
        assert_eq!(issued.len(), 2000);
    }
}
