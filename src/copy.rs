//! Capacity-bounded string copy.

/// Terminator written after the copied bytes.
pub const TERMINATOR: u8 = 0;

/// Copies as much of `src` as fits into `dst` while leaving room for a
/// trailing [`TERMINATOR`], then writes the terminator.
///
/// Returns the number of payload bytes copied (excluding the terminator), or
/// `None` without touching `dst` when `dst` is empty.
///
/// ```text
///   src = "hello", dst.len() = 4
///   dst = [ 'h' 'e' 'l' 0 ]   -> Some(3)
/// ```
#[inline]
pub fn copy_truncated(src: &[u8], dst: &mut [u8]) -> Option<usize> {
    let room = dst.len().checked_sub(1)?;
    let n = src.len().min(room);

    dst[..n].copy_from_slice(&src[..n]);
    dst[n] = TERMINATOR;

    debug_assert!(n < dst.len());
    Some(n)
}
