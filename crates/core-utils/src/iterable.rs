use bytes::Bytes;

/// Entity stored under a key whose byte order defines listing order.
pub trait IterableEntity {
    type Cursor: ToString;

    fn cursor(&self) -> Self::Cursor;

    fn key(&self) -> Bytes;

    fn cursor_bytes(&self) -> Bytes {
        Bytes::from(self.cursor().to_string())
    }
}

/// Half-open key range covering every key that starts with `prefix`.
#[must_use]
pub fn prefix_range(prefix: &str) -> std::ops::Range<Bytes> {
    Bytes::from(prefix.to_string())..Bytes::from(format!("{prefix}\x7F"))
}
