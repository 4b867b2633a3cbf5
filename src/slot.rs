//! Deterministic slot keys for host-side caching
//!
//! The host identifies a rendered fragment by a key derived from the
//! directive. By default only the FEN text is hashed, so two directives that
//! differ only in orientation or annotations share a key. [`KeyScope::Diagram`]
//! hashes the whole diagram instead.

use std::fmt;

use crate::notation::{Codec, Diagram, DirectiveCodec};

/// Which part of a diagram feeds its slot key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyScope {
    /// The FEN text only
    #[default]
    Fen,
    /// FEN, orientation and annotations, via the canonical directive text
    Diagram,
}

/// A host slot identifier, displayed as `chess-<16 hex digits>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey(u64);

impl SlotKey {
    pub fn for_fen(fen: &str) -> Self {
        SlotKey(hash64(fen.as_bytes()))
    }

    pub fn for_diagram(diagram: &Diagram, scope: KeyScope) -> Self {
        match scope {
            KeyScope::Fen => Self::for_fen(diagram.fen()),
            KeyScope::Diagram => SlotKey(hash64(DirectiveCodec.encode(diagram).as_bytes())),
        }
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chess-{:016x}", self.0)
    }
}

/// Deterministic 64-bit hash with xxHash-style mixing and a final avalanche.
pub fn hash64(bytes: &[u8]) -> u64 {
    const PRIME1: u64 = 0x9E3779B185EBCA87;
    const PRIME2: u64 = 0xC2B2AE3D27D4EB4F;
    const PRIME3: u64 = 0x165667B19E3779F9;
    const PRIME5: u64 = 0x27D4EB2F165667C5;

    let mut h: u64 = PRIME5.wrapping_add(bytes.len() as u64);
    for &b in bytes {
        h ^= (b as u64).wrapping_mul(PRIME5);
        h = h.rotate_left(11).wrapping_mul(PRIME1);
    }

    h ^= h >> 33;
    h = h.wrapping_mul(PRIME2);
    h ^= h >> 29;
    h = h.wrapping_mul(PRIME3);
    h ^= h >> 32;
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::decode;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash64(b"abc"), hash64(b"abc"));
        assert_ne!(hash64(b"abc"), hash64(b"abd"));
        assert_ne!(hash64(b""), hash64(b"\0"));
    }

    #[test]
    fn test_key_format() {
        let key = SlotKey::for_fen(START).to_string();
        assert!(key.starts_with("chess-"));
        assert_eq!(key.len(), "chess-".len() + 16);
        assert!(key["chess-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fen_scope_ignores_annotations() {
        let a = decode(&format!("{START}@white@e2-e4")).unwrap().unwrap();
        let b = decode(&format!("{START}@black@g7")).unwrap().unwrap();
        assert_eq!(
            SlotKey::for_diagram(&a, KeyScope::Fen),
            SlotKey::for_diagram(&b, KeyScope::Fen)
        );
        assert_eq!(SlotKey::for_diagram(&a, KeyScope::Fen), SlotKey::for_fen(START));
    }

    #[test]
    fn test_diagram_scope_separates_annotations() {
        let a = decode(&format!("{START}@white@e2-e4")).unwrap().unwrap();
        let b = decode(&format!("{START}@white@e2-e4 g7")).unwrap().unwrap();
        assert_ne!(
            SlotKey::for_diagram(&a, KeyScope::Diagram),
            SlotKey::for_diagram(&b, KeyScope::Diagram)
        );
    }

    #[test]
    fn test_diagram_scope_is_notation_independent() {
        let a = decode(&format!("{START}@black@e4")).unwrap().unwrap();
        let b = decode(&format!("fen: {START}\norientation: black\nannotations: He4"))
            .unwrap()
            .unwrap();
        assert_eq!(
            SlotKey::for_diagram(&a, KeyScope::Diagram),
            SlotKey::for_diagram(&b, KeyScope::Diagram)
        );
    }
}
