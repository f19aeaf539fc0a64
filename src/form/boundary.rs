//! Boundary token generation

use rand::RngCore;

/// Number of random bytes behind each boundary token
pub const BOUNDARY_BYTES: usize = 24;

/// Generate a fresh multipart boundary.
///
/// Returns [`BOUNDARY_BYTES`] random bytes rendered as lowercase hex. No
/// state is kept between calls.
pub fn generate_boundary() -> String {
    let mut bytes = [0u8; BOUNDARY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_lowercase_hex() {
        let boundary = generate_boundary();
        assert_eq!(boundary.len(), BOUNDARY_BYTES * 2);
        assert!(boundary
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_boundaries_differ() {
        assert_ne!(generate_boundary(), generate_boundary());
    }
}
