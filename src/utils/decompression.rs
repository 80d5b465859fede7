use std::io::{self, Read};

use flate2::read::GzDecoder;

/// gzip member header magic
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Supported compression formats detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Magic byte detection and gzip decompression
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        if data.starts_with(&GZIP_MAGIC) {
            CompressionFormat::Gzip
        } else {
            CompressionFormat::Uncompressed
        }
    }

    /// Decompress gzip data. Bodies without the gzip magic are rejected
    /// before decoding; truncated or corrupt streams fail while decoding.
    pub fn decompress_gzip(data: &[u8]) -> io::Result<Vec<u8>> {
        let format = Self::detect_compression_format(data);
        if format != CompressionFormat::Gzip {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected gzip body, got {format:?} data ({} bytes)", data.len()),
            ));
        }

        let mut decoder = GzDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        Ok(decompressed)
    }
}
