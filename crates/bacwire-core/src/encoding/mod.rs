/// Fixed-width and minimal-length primitive payload codecs.
pub mod primitives;
/// Cursor for decoding received frames.
pub mod reader;
/// Tag headers: application, context, opening and closing.
pub mod tag;
/// Cursor for encoding into a caller-owned buffer.
pub mod writer;
