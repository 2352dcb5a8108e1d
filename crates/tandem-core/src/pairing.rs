use sha2::{Digest, Sha256};

/// Derive the canonical pairing id for an unordered pair of user ids.
///
/// The larger id's big-endian bytes are written first so that the buffer,
/// and therefore the digest, is identical regardless of argument order. The
/// first 8 digest bytes are read as a big-endian u64 and the sign bit is
/// cleared, so the result is always a non-negative i64.
///
/// Pure and infallible. Equal ids still hash to a value, but such a pairing
/// is meaningless; callers must reject it before getting here.
pub fn derive_pairing_id(a: i64, b: i64) -> i64 {
    let (high, low) = if a > b { (a, b) } else { (b, a) };

    let mut buf = [0u8; 16];
    buf[..8].copy_from_slice(&(high as u64).to_be_bytes());
    buf[8..].copy_from_slice(&(low as u64).to_be_bytes());

    let digest = Sha256::digest(buf);
    let head = u64::from_be_bytes(digest[..8].try_into().expect("digest is 32 bytes"));

    (head & 0x7FFF_FFFF_FFFF_FFFF) as i64
}
