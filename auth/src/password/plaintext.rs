/// Compare two secrets without short-circuiting on the first differing byte.
///
/// Only the length is allowed to leak: the loop always walks the full
/// supplied value.
pub fn constant_time_eq(supplied: &[u8], reference: &[u8]) -> bool {
    let mut diff = u8::from(supplied.len() != reference.len());
    for (i, byte) in supplied.iter().enumerate() {
        let other = reference.get(i).copied().unwrap_or(0);
        diff |= byte ^ other;
    }
    diff == 0
}
