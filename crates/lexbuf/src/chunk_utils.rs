use alloc::vec::Vec;

/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// A helper for tests and benchmarks; hidden from the documented API.
///
/// Chunks are cut at arbitrary byte positions, including inside UTF-8
/// sequences, since the lexer works on bytes. Feed the result to
/// [`Chunked`](crate::Chunked) to simulate a stream arriving in pieces.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn split_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0, "cannot split into zero parts");
    if payload.is_empty() {
        return Vec::new();
    }
    payload.chunks(payload.len().div_ceil(parts)).collect()
}
