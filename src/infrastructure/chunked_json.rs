// Chunked JSON streaming utilities
use crate::application::renderer::RenderFrame;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast;

/// Create a chunked frame streaming response
pub async fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = Arc<RenderFrame>> + Send + 'static,
{
    let byte_stream = stream.then(move |frame| async move { serialize_chunk(&frame, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed one by one, so no Content-Encoding on the response
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndframe")
        .header(header::TRANSFER_ENCODING, "chunked");

    response
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single frame to a length-prefixed chunk
pub async fn serialize_chunk(frame: &RenderFrame, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(frame)?;

    let payload = if compress {
        let cursor = std::io::Cursor::new(buffer);
        let mut encoder = BrotliEncoder::new(cursor);
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await?;
        compressed
    } else {
        buffer
    };

    // 4 byte big-endian length, then the payload
    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a frame subscription
pub async fn stream_from_receiver(
    mut rx: broadcast::Receiver<Arc<RenderFrame>>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(frame) => yield frame,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Frame subscriber lagged, skipped {} frames", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{Batch, SeriesValues};
    use crate::domain::viewport::Viewport;
    use crate::domain::window::WindowState;

    fn frame() -> RenderFrame {
        let state = WindowState::bootstrap(
            3000.0,
            Batch::new(
                vec![0.0, 1000.0, 2000.0, 3000.0],
                vec![SeriesValues::new("New York", vec![0.0, 1.0, -1.0, 0.0])],
            ),
        )
        .unwrap();
        RenderFrame::capture(3, &state, None, &Viewport::default())
    }

    #[tokio::test]
    async fn test_uncompressed_chunk_is_length_prefixed_json() {
        let chunk = serialize_chunk(&frame(), false).await.unwrap();
        let length = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(length, chunk.len() - 4);

        let value: serde_json::Value = serde_json::from_slice(&chunk[4..]).unwrap();
        assert_eq!(value["sequence"], 3);
        assert_eq!(value["domain_x"]["lo"], 0.0);
        assert_eq!(value["series"][0]["id"], "New York");
        assert!(value["shift"].is_null());
    }

    #[tokio::test]
    async fn test_compressed_chunk_declares_its_length() {
        let chunk = serialize_chunk(&frame(), true).await.unwrap();
        let length = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(length, chunk.len() - 4);
        assert!(length > 0);
    }
}
