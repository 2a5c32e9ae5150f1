//! Move-token extraction from PGN-style game records.
//!
//! This is a heuristic filter, not a PGN grammar: the record is split on
//! whitespace and a token is kept iff it starts with a from-square/to-square
//! pair in coordinate notation ("e2e4"). Move numbers, SAN tokens, result
//! codes and annotation glyphs simply fail the pattern. No legality check
//! is performed, and a coincidental match passes through unchanged;
//! downstream consumers must tolerate tokens that are not legal moves.

/// Returns the record's move tokens in left-to-right order.
///
/// The iterator borrows `record`; call again on the same record to restart.
/// Characters after the four-square prefix (promotion pieces, check marks)
/// are kept as part of the token.
pub fn extract_moves(record: &str) -> impl Iterator<Item = &str> {
    record
        .split_whitespace()
        .filter(|token| is_coordinate_move(token))
}

/// True if the token's first four characters are file a-h, rank 1-8,
/// file a-h, rank 1-8.
fn is_coordinate_move(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 4
        && matches!(bytes[0], b'a'..=b'h')
        && matches!(bytes[1], b'1'..=b'8')
        && matches!(bytes[2], b'a'..=b'h')
        && matches!(bytes[3], b'1'..=b'8')
}
