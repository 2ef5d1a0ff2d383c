use crate::error::CodecError;

/// Represents the result of reading an item from the reader.
///
/// This type is a specialized `Result` that can be:
/// - `Ok(Some(R))` when an item is successfully read
/// - `Ok(None)` when there are no more items to read
/// - `Err(CodecError)` when an error occurs during reading
pub type ItemReaderResult<R> = Result<Option<R>, CodecError>;

/// Represents the result of writing items.
pub type ItemWriterResult = Result<(), CodecError>;

/// A source of records, read one at a time.
pub trait ItemReader<R> {
    fn read(&self) -> ItemReaderResult<R>;
}

/// A destination for records, written in batches.
pub trait ItemWriter<W> {
    fn write(&self, items: &[W]) -> ItemWriterResult;
}
