use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one concatenation pass.
#[derive(Debug, Clone, Copy)]
pub struct ConcatSummary {
    pub segments: usize,
    pub bytes_written: u64,
}

/// MPEG-1 Layer III header for a 128 kbps, 44.1 kHz mono frame.
const SILENCE_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];
/// Total frame length at that bitrate (144 * 128000 / 44100).
const SILENCE_FRAME_LEN: usize = 417;
/// Decoded duration of one frame (1152 samples at 44.1 kHz).
const SILENCE_FRAME_MS: u64 = 26;

/// Concatenate the ordered segment files into one output file.
///
/// MP3 frame streams are self-delimiting, so segments merge by byte
/// append. A nonzero inter-segment gap is rendered by repeating an
/// encoded silence frame between segments.
pub async fn concatenate(
    segments: &[PathBuf],
    output_path: &Path,
    gap: Duration,
) -> io::Result<ConcatSummary> {
    let gap_bytes = silence(gap);
    let mut merged: Vec<u8> = Vec::new();

    for (position, segment) in segments.iter().enumerate() {
        if position > 0 {
            merged.extend_from_slice(&gap_bytes);
        }
        let bytes = tokio::fs::read(segment).await?;
        merged.extend_from_slice(&bytes);
    }

    tokio::fs::write(output_path, &merged).await?;

    Ok(ConcatSummary {
        segments: segments.len(),
        bytes_written: merged.len() as u64,
    })
}

/// Encoded silence covering at least the requested gap, rounded down to
/// whole frames. A zero gap yields no bytes.
fn silence(gap: Duration) -> Vec<u8> {
    let frames = (gap.as_millis() as u64 / SILENCE_FRAME_MS) as usize;
    let mut buf = Vec::with_capacity(frames * SILENCE_FRAME_LEN);
    for _ in 0..frames {
        buf.extend_from_slice(&SILENCE_FRAME_HEADER);
        buf.resize(buf.len() + SILENCE_FRAME_LEN - SILENCE_FRAME_HEADER.len(), 0);
    }
    buf
}
