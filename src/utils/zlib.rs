use std::io::{Read, Write};
use std::rc::Rc;

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::{Error, Result};

/// Compresses `bytes` using a zlib encoder.
///
/// # Errors
///
/// This function will fail if the `ZlibEncoder` fails.
pub fn compress(bytes: &[u8]) -> Result<Rc<[u8]>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?.into();

    Ok(compressed)
}

/// Returns `bytes` decompressed, using a zlib decoder.
///
/// The output buffer grows as the stream inflates, so any legal output of
/// `compress` is accepted regardless of its size.
///
/// # Errors
///
/// This function will fail with `CorruptObject` if the stream does not decode.
pub fn decompress(bytes: &[u8]) -> Result<Rc<[u8]>> {
    let mut buf = Vec::new();
    let mut decoder = ZlibDecoder::new(bytes);
    decoder
        .read_to_end(&mut buf)
        .map_err(|e| Error::corrupt(format!("could not decompress data: {e}")))?;

    Ok(buf.into())
}

// Tests
