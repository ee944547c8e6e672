//! Compressed-body transport
//!
//! [`BfWriter`] and [`BfReader`] wrap one sink or source each and implement
//! the body protocol:
//!
//! ```text
//! Header := 'B' 'F' assetType(u8) version(u8)
//! Body   := uncompressedLen(u32) compressedLen(u32) compressedBytes
//! ```
//!
//! On the write side everything written between
//! [`BfWriter::begin_compressed_body`] and [`BfWriter::end_compressed_body`]
//! is buffered in memory and emitted as one compressed block. On the read
//! side [`BfReader::decompress_body`] inflates the whole block and all later
//! reads are served from it.

use std::io::{self, Cursor, Read, Write};
use std::mem;

use crate::compression::{self, CompressionAlgorithm};
use crate::header::{self, AssetType, FileHeader};
use crate::io_ext::{BfReadExt, BfWriteExt};
use crate::observer::LoadObserver;
use crate::options::WriteOptions;
use crate::{Error, Result};

/// Frame of a compressed body as stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyInfo {
    /// Length of the payload after decompression
    pub uncompressed_len: u32,
    /// Length of the compressed block
    pub compressed_len: u32,
    /// Algorithm implied by the header version
    pub algorithm: CompressionAlgorithm,
}

impl BodyInfo {
    /// Size of the two length fields preceding the compressed block
    pub const FRAME_SIZE: usize = 8;

    /// Total bytes the body occupies in the file
    pub fn stored_len(&self) -> u64 {
        Self::FRAME_SIZE as u64 + u64::from(self.compressed_len)
    }
}

#[derive(Debug)]
enum WriteState {
    Start,
    HeaderWritten,
    Buffering(Vec<u8>),
    BodyWritten,
    Finished,
}

/// Writer for a single BF file
///
/// Call [`write_header`](Self::write_header), then
/// [`begin_compressed_body`](Self::begin_compressed_body), write the payload
/// through the [`Write`] impl, call
/// [`end_compressed_body`](Self::end_compressed_body) and finally
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct BfWriter<W: Write> {
    sink: Option<W>,
    state: WriteState,
    options: WriteOptions,
}

impl<W: Write> BfWriter<W> {
    /// Wrap a sink with the default options
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, WriteOptions::default())
    }

    /// Wrap a sink with explicit options
    pub fn with_options(sink: W, options: WriteOptions) -> Self {
        Self {
            sink: Some(sink),
            state: WriteState::Start,
            options,
        }
    }

    /// Version this writer stamps into the header
    pub fn version(&self) -> u8 {
        self.options.version
    }

    /// Whether a compressed body is currently being buffered
    pub fn is_body_open(&self) -> bool {
        matches!(self.state, WriteState::Buffering(_))
    }

    fn sink_mut(&mut self) -> io::Result<&mut W> {
        self.sink
            .as_mut()
            .ok_or_else(|| io::Error::other("BF writer sink already released"))
    }

    /// Write the file header
    pub fn write_header(&mut self, asset_type: AssetType) -> Result<()> {
        if !matches!(self.state, WriteState::Start) {
            return Err(Error::resource_misuse("header already written"));
        }
        let version = self.options.version;
        header::write_header(self.sink_mut()?, asset_type, version)?;
        self.state = WriteState::HeaderWritten;
        Ok(())
    }

    /// Start buffering the body
    ///
    /// `estimated_size` is the expected uncompressed size and is used as the
    /// initial buffer capacity. Writing more than the estimate is allowed.
    pub fn begin_compressed_body(&mut self, estimated_size: usize) -> Result<()> {
        match self.state {
            WriteState::HeaderWritten => {
                log::trace!("Buffering BF body, estimated {estimated_size} bytes");
                self.state = WriteState::Buffering(Vec::with_capacity(estimated_size));
                Ok(())
            }
            WriteState::Start => Err(Error::resource_misuse(
                "compressed body started before the header was written",
            )),
            WriteState::Buffering(_) => {
                Err(Error::resource_misuse("compressed body already open"))
            }
            WriteState::BodyWritten | WriteState::Finished => Err(Error::resource_misuse(
                "a BF file holds exactly one body",
            )),
        }
    }

    /// Compress the buffered body and emit it to the sink
    pub fn end_compressed_body(&mut self) -> Result<BodyInfo> {
        let body = match mem::replace(&mut self.state, WriteState::BodyWritten) {
            WriteState::Buffering(body) => body,
            other => {
                self.state = other;
                return Err(Error::resource_misuse("no compressed body is open"));
            }
        };

        let algorithm = CompressionAlgorithm::for_version(self.options.version)?;
        let compressed = compression::compress(&body, algorithm, self.options.compression_level)?;

        let uncompressed_len = u32::try_from(body.len()).map_err(|_| Error::ValueTooLarge {
            what: "uncompressed body",
            len: body.len(),
        })?;
        let compressed_len =
            u32::try_from(compressed.len()).map_err(|_| Error::ValueTooLarge {
                what: "compressed body",
                len: compressed.len(),
            })?;

        let sink = self.sink_mut()?;
        sink.write_u32_be(uncompressed_len)?;
        sink.write_u32_be(compressed_len)?;
        sink.write_all(&compressed)?;

        log::debug!(
            "Wrote BF body: {uncompressed_len} bytes -> {compressed_len} bytes ({algorithm})"
        );

        Ok(BodyInfo {
            uncompressed_len,
            compressed_len,
            algorithm,
        })
    }

    /// Flush and release the sink
    ///
    /// Fails with [`Error::ResourceMisuse`] if the body is still open or was
    /// never written.
    pub fn finish(mut self) -> Result<W> {
        match mem::replace(&mut self.state, WriteState::Finished) {
            WriteState::BodyWritten => {}
            WriteState::Buffering(body) => {
                return Err(Error::resource_misuse(format!(
                    "writer closed with an open compressed body ({} bytes buffered)",
                    body.len()
                )));
            }
            WriteState::Start | WriteState::HeaderWritten | WriteState::Finished => {
                return Err(Error::resource_misuse("writer closed before a body was written"));
            }
        }

        let mut sink = self
            .sink
            .take()
            .ok_or_else(|| Error::resource_misuse("BF writer sink already released"))?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> Write for BfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let WriteState::Buffering(body) = &mut self.state {
            body.extend_from_slice(buf);
            return Ok(buf.len());
        }
        if matches!(self.state, WriteState::BodyWritten | WriteState::Finished) {
            return Err(io::Error::other("write after the BF body was closed"));
        }
        self.sink_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state {
            WriteState::Buffering(_) => Ok(()),
            _ => match self.sink.as_mut() {
                Some(sink) => sink.flush(),
                None => Ok(()),
            },
        }
    }
}

impl<W: Write> Drop for BfWriter<W> {
    fn drop(&mut self) {
        if let WriteState::Buffering(body) = &self.state {
            log::error!(
                "BF writer dropped with an open compressed body; {} buffered bytes discarded",
                body.len()
            );
        }
    }
}

#[derive(Debug)]
enum ReadTarget<R> {
    Source(R),
    Body(Cursor<Vec<u8>>),
}

/// Reader for a single BF file
///
/// After [`decompress_body`](Self::decompress_body) the source is dropped
/// and every read is served from the in-memory body.
#[derive(Debug)]
pub struct BfReader<R: Read> {
    target: ReadTarget<R>,
    header: Option<FileHeader>,
    body_info: Option<BodyInfo>,
}

impl<R: Read> BfReader<R> {
    /// Wrap a source positioned at the start of a BF file
    pub fn new(source: R) -> Self {
        Self {
            target: ReadTarget::Source(source),
            header: None,
            body_info: None,
        }
    }

    fn source_mut(&mut self) -> Result<&mut R> {
        match &mut self.target {
            ReadTarget::Source(source) => Ok(source),
            ReadTarget::Body(_) => Err(Error::resource_misuse(
                "source already released after decompression",
            )),
        }
    }

    /// Read and validate the header, returning the version present
    pub fn read_header(&mut self, expected: AssetType, max_version: u8) -> Result<u8> {
        if self.header.is_some() {
            return Err(Error::resource_misuse("header already read"));
        }
        let version = header::read_header(self.source_mut()?, expected, max_version)?;
        self.header = Some(FileHeader {
            asset_tag: expected.tag(),
            version,
        });
        Ok(version)
    }

    /// Read the header checking only the magic
    ///
    /// The caller decides what to accept; used for format detection.
    pub fn read_file_header(&mut self) -> Result<FileHeader> {
        if self.header.is_some() {
            return Err(Error::resource_misuse("header already read"));
        }
        let header = FileHeader::read(self.source_mut()?)?;
        self.header = Some(header);
        Ok(header)
    }

    /// Header read so far, if any
    pub fn header(&self) -> Option<FileHeader> {
        self.header
    }

    /// Body frame, once decompressed
    pub fn body_info(&self) -> Option<BodyInfo> {
        self.body_info
    }

    /// Read and decompress the body, releasing the source
    pub fn decompress_body<O: LoadObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<BodyInfo> {
        let version = match self.header {
            Some(header) => header.version,
            None => {
                return Err(Error::resource_misuse(
                    "body decompressed before the header was read",
                ));
            }
        };
        if self.body_info.is_some() {
            return Err(Error::resource_misuse("body already decompressed"));
        }
        let algorithm = CompressionAlgorithm::for_version(version)?;

        let source = self.source_mut()?;
        let uncompressed_len = source.read_u32_be()?;
        let compressed_len = source.read_u32_be()?;

        let mut compressed = Vec::new();
        source
            .by_ref()
            .take(u64::from(compressed_len))
            .read_to_end(&mut compressed)?;
        if compressed.len() != compressed_len as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "compressed body truncated: expected {compressed_len} bytes, got {}",
                    compressed.len()
                ),
            )
            .into());
        }

        let body = compression::decompress(&compressed, algorithm, uncompressed_len as usize)?;

        log::debug!(
            "Decompressed BF body: {compressed_len} bytes -> {uncompressed_len} bytes ({algorithm})"
        );
        observer.body_decompressed(compressed_len, uncompressed_len);
        observer.allocated(body.len());

        let info = BodyInfo {
            uncompressed_len,
            compressed_len,
            algorithm,
        };
        self.body_info = Some(info);
        // Drops the source
        self.target = ReadTarget::Body(Cursor::new(body));
        Ok(info)
    }

    /// Bytes of the decompressed body not yet consumed
    pub fn remaining(&self) -> usize {
        match &self.target {
            ReadTarget::Body(cursor) => {
                let len = cursor.get_ref().len();
                len.saturating_sub(cursor.position() as usize)
            }
            ReadTarget::Source(_) => 0,
        }
    }

    /// Take the decompressed body, if the body has been read
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self.target {
            ReadTarget::Body(cursor) => Some(cursor.into_inner()),
            ReadTarget::Source(_) => None,
        }
    }
}

impl<R: Read> Read for BfReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.target {
            ReadTarget::Source(source) => source.read(buf),
            ReadTarget::Body(cursor) => cursor.read(buf),
        }
    }
}
