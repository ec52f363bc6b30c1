//! Reader for the IDX (`ubyte`) files MNIST is distributed in
//!
//! Image files start with magic `0x00000803` followed by big-endian `u32`
//! count, rows and columns, then one byte per pixel. Label files start with
//! magic `0x00000801` and a big-endian `u32` count, then one byte per label.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::dataset::{Images, Labels};
use crate::error::{Error, Result};

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

fn read_be_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32> {
    let mut bytes = [0u8; 4];
    read_exact(reader, &mut bytes, what)?;
    Ok(u32::from_be_bytes(bytes))
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::Truncated(what),
        _ => Error::Io(err),
    })
}

fn check_magic(found: u32, expected: u32) -> Result<()> {
    if found != expected {
        return Err(Error::BadMagic { expected, found });
    }
    Ok(())
}

/// Parse an IDX image stream.
pub fn read_images<R: Read>(mut reader: R) -> Result<Images> {
    check_magic(read_be_u32(&mut reader, "image magic number")?, IMAGE_MAGIC)?;
    let count = read_be_u32(&mut reader, "image count")? as usize;
    let rows = read_be_u32(&mut reader, "image rows")? as usize;
    let cols = read_be_u32(&mut reader, "image columns")? as usize;

    let len = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or(Error::SizeOverflow("image pixels"))?;
    let mut pixels = vec![0u8; len];
    read_exact(&mut reader, &mut pixels, "image pixels")?;
    Images::new(count, cols, rows, pixels)
}

/// Parse an IDX label stream.
pub fn read_labels<R: Read>(mut reader: R) -> Result<Labels> {
    check_magic(read_be_u32(&mut reader, "label magic number")?, LABEL_MAGIC)?;
    let count = read_be_u32(&mut reader, "label count")? as usize;

    let mut labels = vec![0u8; count];
    read_exact(&mut reader, &mut labels, "labels")?;
    Ok(Labels::new(labels))
}

/// Load an IDX image file.
pub fn load_images<P: AsRef<Path>>(path: P) -> Result<Images> {
    let file = File::open(path)?;
    read_images(BufReader::new(file))
}

/// Load an IDX label file.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Labels> {
    let file = File::open(path)?;
    read_labels(BufReader::new(file))
}
