//! Streaming-safe base64 codec.
//!
//! Conversion between raw binary content and base64 text. The encoding side
//! accepts a byte stream and transforms it chunk by chunk, so a download
//! never needs to be buffered in full before encoding begins.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use thiserror::Error;

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input text is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The source stream failed before completion.
    #[error("stream failed while encoding: {0}")]
    Stream(String),
}

/// Encodes a full byte buffer as base64 text.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes base64 text into raw bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encoding`] if the text is not valid base64.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text)?)
}

/// Consumes a byte stream to completion and produces one base64 string.
///
/// Chunks are encoded incrementally: complete 3-byte groups are emitted as
/// they arrive and at most two bytes are carried over between chunks, so the
/// output matches [`encode`] of the concatenated input for any chunking.
///
/// # Errors
///
/// Returns [`CodecError::Stream`] if the source stream yields an error
/// before completion.
pub async fn encode_stream<S>(mut stream: S) -> Result<String, CodecError>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
{
    let mut encoded = String::new();
    // Carries the trailing partial group (0-2 bytes) between chunks.
    let mut carry: Vec<u8> = Vec::with_capacity(2);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| CodecError::Stream(e.to_string()))?;
        if chunk.is_empty() {
            continue;
        }

        if carry.is_empty() && chunk.len() % 3 == 0 {
            encoded.push_str(&STANDARD.encode(&chunk));
            continue;
        }

        carry.extend_from_slice(&chunk);
        let whole_groups = carry.len() - carry.len() % 3;
        encoded.push_str(&STANDARD.encode(&carry[..whole_groups]));
        carry.drain(..whole_groups);
    }

    // Final partial group gets its padding here.
    encoded.push_str(&STANDARD.encode(&carry));
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use rstest::rstest;

    fn chunked(data: &[u8], size: usize) -> Vec<Result<Bytes, std::io::Error>> {
        data.chunks(size.max(1))
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(7)]
    #[case(64)]
    #[tokio::test]
    async fn test_encode_stream_matches_one_shot(#[case] size: usize) {
        let data = b"hello blob storage gateway";
        let result = encode_stream(stream::iter(chunked(data, size)))
            .await
            .expect("should encode");
        assert_eq!(result, encode(data), "chunk size {size}");
    }

    #[tokio::test]
    async fn test_encode_stream_empty() {
        let result = encode_stream(stream::iter(chunked(b"", 4)))
            .await
            .expect("should encode");
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_encode_stream_skips_empty_chunks() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"he")),
            Ok(Bytes::new()),
            Ok(Bytes::from_static(b"llo")),
        ];
        let result = encode_stream(stream::iter(chunks))
            .await
            .expect("should encode");
        assert_eq!(result, encode(b"hello"));
    }

    #[tokio::test]
    async fn test_encode_stream_propagates_source_error() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let err = encode_stream(stream::iter(chunks))
            .await
            .expect_err("should fail");
        assert!(matches!(err, CodecError::Stream(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_decode_round_trip() {
        let data = b"\x00\x01\xfe\xffbinary";
        let decoded = decode(&encode(data)).expect("should decode");
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_decode_rejects_invalid_text() {
        let err = decode("not base64!!").expect_err("should fail");
        assert!(matches!(err, CodecError::Encoding(_)));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use futures::stream;
    use proptest::prelude::*;

    // Property: for any byte sequence and any chunking of it, streaming
    // encoding equals one-shot encoding.
    proptest! {
        #[test]
        fn prop_encode_stream_chunking_invariant(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            chunk_size in 1usize..32,
        ) {
            let chunks: Vec<Result<Bytes, std::io::Error>> = data
                .chunks(chunk_size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();

            let streamed = futures::executor::block_on(
                encode_stream(stream::iter(chunks)),
            ).expect("should encode");

            prop_assert_eq!(streamed, encode(&data));
        }
    }

    // Property: decode inverts encode for arbitrary bytes.
    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            data in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let decoded = decode(&encode(&data)).expect("should decode");
            prop_assert_eq!(decoded, data);
        }
    }
}
