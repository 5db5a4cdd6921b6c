//! Audio decoding using Symphonia

use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::CurveError;

/// Decode an audio file to mono PCM samples
///
/// Multi-channel audio is downmixed by averaging the channels per frame.
///
/// # Arguments
///
/// * `path` - Path to the audio file (format probed from content, with the
///   extension as a hint)
///
/// # Returns
///
/// Tuple of (mono samples, sample rate)
///
/// # Errors
///
/// Returns [`CurveError::Decoding`] if the file cannot be opened, probed, or
/// decoded, or contains no audio track.
pub fn decode_to_mono(path: &Path) -> Result<(Vec<f32>, u32), CurveError> {
    log::debug!("Decoding audio file: {}", path.display());

    let file = std::fs::File::open(path)
        .map_err(|e| CurveError::Decoding(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CurveError::Decoding(format!("{}: {}", path.display(), e)))?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.sample_rate.is_some())
        .ok_or_else(|| {
            CurveError::Decoding(format!("{}: no audio track found", path.display()))
        })?
        .clone();

    let sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(0);
    if sample_rate == 0 || channels == 0 {
        return Err(CurveError::Decoding(format!(
            "{}: missing sample rate or channel layout",
            path.display()
        )));
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| CurveError::Decoding(e.to_string()))?;

    let mut interleaved: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            // End of stream surfaces as an I/O error
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(CurveError::Decoding(e.to_string())),
        };

        if packet.track_id() != track.id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(audio) => audio,
            Err(SymphoniaError::IoError(_)) => break,
            // Skip malformed packets rather than failing the whole file
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(CurveError::Decoding(e.to_string())),
        };

        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
        buf.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(buf.samples());
    }

    let frames = interleaved.len() / channels;
    let mono = if channels == 1 {
        interleaved
    } else {
        let mut mono = Vec::with_capacity(frames);
        for frame in interleaved.chunks_exact(channels) {
            mono.push(frame.iter().sum::<f32>() / channels as f32);
        }
        mono
    };

    log::debug!(
        "Decoded {} mono frames at {} Hz ({} channel(s))",
        mono.len(),
        sample_rate,
        channels
    );

    Ok((mono, sample_rate))
}
