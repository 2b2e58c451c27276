// src/exec/encoding.rs

//! Stream text encoding for the child process.
//!
//! Captured stdout/stderr bytes are decoded as GBK, and the child is told
//! to write GBK through `PYTHONIOENCODING`. Pinning the same legacy
//! encoding on both ends keeps non-ASCII output intact regardless of the
//! platform default; a writer/reader mismatch here garbles every non-ASCII
//! byte, so the two constants below must stay in agreement.

use encoding_rs::GBK;

/// Value for the child's `PYTHONIOENCODING` environment variable. Must
/// name the encoding [`decode_stream`] decodes with.
pub const STREAM_ENCODING_NAME: &str = "gbk";

/// Decode captured child output. Undecodable sequences are replaced rather
/// than failing the run.
pub fn decode_stream(bytes: &[u8]) -> String {
    let (text, _, _) = GBK.decode(bytes);
    text.into_owned()
}
