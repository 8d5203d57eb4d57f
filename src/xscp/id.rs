//! Node and style identifiers
//!
//! Webflow keys every node and style by a version-4 UUID in canonical
//! lowercase `8-4-4-4-12` form. Identifiers only need to avoid collisions,
//! they are never secrets.

use uuid::Uuid;

/// Source of fresh identifiers for a payload build
pub trait IdGenerator {
    /// Produce the next identifier
    fn next_id(&mut self) -> String;
}

/// Random version-4 UUIDs from the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        generate_id()
    }
}

/// Generate one random version-4 identifier
pub fn generate_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Check the canonical shape: 36 chars, lowercase hex in `8-4-4-4-12`
/// groups, version nibble `4`, variant nibble one of `8 9 a b`.
pub fn is_v4_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 36 {
        return false;
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            8 | 13 | 18 | 23 => b == b'-',
            14 => b == b'4',
            19 => matches!(b, b'8' | b'9' | b'a' | b'b'),
            _ => b.is_ascii_digit() || (b'a'..=b'f').contains(&b),
        };
        if !ok {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generated_shape() {
        for _ in 0..256 {
            let id = generate_id();
            assert!(is_v4_id(&id), "bad id: {}", id);
        }
    }

    #[test]
    fn test_consecutive_ids_differ() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(is_v4_id("123e4567-e89b-42d3-a456-426614174000"));

        // wrong version
        assert!(!is_v4_id("123e4567-e89b-12d3-a456-426614174000"));
        // wrong variant
        assert!(!is_v4_id("123e4567-e89b-42d3-c456-426614174000"));
        // uppercase
        assert!(!is_v4_id("123E4567-E89B-42D3-A456-426614174000"));
        // missing hyphen
        assert!(!is_v4_id("123e4567e89b-42d3-a456-426614174000-"));
        assert!(!is_v4_id(""));
    }

    proptest! {
        #[test]
        fn prop_uuid_crate_output_matches_shape(bytes in any::<[u8; 16]>()) {
            let id = uuid::Builder::from_random_bytes(bytes).into_uuid().hyphenated().to_string();
            prop_assert!(is_v4_id(&id));
        }
    }
}
