//! gzip encode/decode.
//!
//! The codec runs on tokio's blocking pool so large buffers do not stall the
//! async workers.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::error::{HostError, HostResult};

/// gzip `data` at `level` (0-9).
pub fn gzip(data: &[u8], level: u32) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()
}

/// Decode a gzip stream, including concatenated members.
pub fn gunzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    if data.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "empty gzip stream",
        ));
    }
    let mut out = Vec::with_capacity(data.len() * 2);
    MultiGzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

pub async fn compress(data: Vec<u8>, level: u32) -> HostResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || gzip(&data, level))
        .await
        .map_err(|err| HostError::Task(err.to_string()))?
        .map_err(HostError::Compression)
}

pub async fn decompress(data: Vec<u8>) -> HostResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || gunzip(&data))
        .await
        .map_err(|err| HostError::Task(err.to_string()))?
        .map_err(HostError::Compression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_round_trip_empty() {
        let packed = compress(Vec::new(), 6).await.unwrap();
        assert!(!packed.is_empty());
        assert_eq!(decompress(packed).await.unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn test_gzip_magic() {
        let packed = compress(b"hello hello hello".to_vec(), 9).await.unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
    }

    #[tokio::test]
    async fn test_decompress_garbage_is_malformed() {
        let err = decompress(b"definitely not gzip".to_vec()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = decompress(Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_concatenated_members() {
        let mut packed = gzip(b"first ", 6).unwrap();
        packed.extend(gzip(b"second", 1).unwrap());
        assert_eq!(gunzip(&packed).unwrap(), b"first second");
    }

    proptest! {
        #[test]
        fn prop_round_trip(data in prop::collection::vec(any::<u8>(), 0..4096), level in 0u32..=9) {
            let packed = gzip(&data, level).unwrap();
            prop_assert_eq!(gunzip(&packed).unwrap(), data);
        }
    }
}
