/// Jenkins one-at-a-time hash.
///
/// Chosen for its avalanche behavior on short keys; every step is plain
/// wrapping integer arithmetic, so the result is bit-identical on every
/// platform.
pub fn jenkins_oat(bytes: &[u8]) -> u32 {
    let mut hash = 0u32;
    for &b in bytes {
        hash = hash.wrapping_add(u32::from(b));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Hash a coordinate pair: `x` then `y`, each packed little-endian.
///
/// The byte order is part of the contract — star eligibility and animation
/// phase both derive from this value and must reproduce across platforms.
pub fn hash_coord(x: u32, y: u32) -> u32 {
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&x.to_le_bytes());
    buf[4..].copy_from_slice(&y.to_le_bytes());
    jenkins_oat(&buf)
}
