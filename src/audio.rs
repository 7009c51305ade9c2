//! Uncompressed WAV container writer.
//!
//! The speech collaborator hands back raw linear PCM; this wraps it in a
//! canonical 44-byte RIFF header so browsers and players accept it.

/// Sample rate of the TTS output
pub const SAMPLE_RATE: u32 = 24_000;
/// Mono narration
pub const CHANNELS: u16 = 1;
/// 16-bit signed little-endian samples
pub const BITS_PER_SAMPLE: u16 = 16;

/// Wraps raw PCM bytes in a WAV (RIFF) container
pub fn encode_wav(pcm: &[u8], channels: u16, sample_rate: u32, bits_per_sample: u16) -> Vec<u8> {
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());

    // RIFF chunk
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk: PCM, no extension
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // audio format: linear PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}

/// WAV for the service's fixed narration format
pub fn encode_narration_wav(pcm: &[u8]) -> Vec<u8> {
    encode_wav(pcm, CHANNELS, SAMPLE_RATE, BITS_PER_SAMPLE)
}
