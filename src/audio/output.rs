// SPDX-License-Identifier: MPL-2.0
//! Audio cue playback using cpal.
//!
//! A dedicated playback thread owns the cpal stream (streams are not
//! `Send`) and receives cues through a bounded channel. The stream callback
//! drains a shared sample buffer; cues are synthesized on the playback
//! thread and appended to that buffer.
//!
//! Playback is strictly best-effort: a missing output device, an
//! unsupported sample format, or a full cue queue all result in the cue
//! being dropped, never in an error reaching the notification manager.

use super::cue::Cue;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Pending cues the playback thread will accept before dropping new ones.
const CUE_QUEUE_CAPACITY: usize = 8;

/// Cap on buffered mono samples (~2 seconds), to bound memory when cues
/// arrive faster than the device drains them.
const MAX_BUFFERED_SECS: usize = 2;

/// Cheap cloneable handle that queues cues for the playback thread.
#[derive(Debug, Clone)]
pub struct CuePlayer {
    cue_tx: Sender<Cue>,
}

impl CuePlayer {
    /// Starts the playback thread and returns a handle to it.
    ///
    /// Device setup happens on the playback thread; when it fails the
    /// thread exits and every later [`play`](Self::play) silently drops its
    /// cue through the disconnected channel.
    #[must_use]
    pub fn spawn() -> Self {
        let (cue_tx, cue_rx) = bounded(CUE_QUEUE_CAPACITY);
        let _ = std::thread::Builder::new()
            .name("cnc-notify-audio".to_string())
            .spawn(move || playback_thread(&cue_rx));
        Self { cue_tx }
    }

    /// Queues a cue for playback. Non-blocking; the cue is dropped when the
    /// queue is full or no playback thread is running.
    pub fn play(&self, cue: Cue) {
        let _ = self.cue_tx.try_send(cue);
    }
}

fn playback_thread(cue_rx: &Receiver<Cue>) {
    let Ok(output) = OutputStream::open() else {
        return;
    };
    while let Ok(cue) = cue_rx.recv() {
        output.enqueue(cue.synthesize(output.sample_rate()));
    }
}

/// Open output stream draining the shared sample buffer.
struct OutputStream {
    buffer: Arc<Mutex<VecDeque<f32>>>,
    sample_rate: u32,
    max_buffered: usize,
    /// Kept alive to maintain playback.
    _stream: cpal::Stream,
}

impl OutputStream {
    fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels() as usize;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();

        let buffer: Arc<Mutex<VecDeque<f32>>> = Arc::new(Mutex::new(VecDeque::new()));

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&buffer), channels)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, Arc::clone(&buffer), channels)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, Arc::clone(&buffer), channels)
            }
            _ => Err(Error::Audio("Unsupported audio sample format".to_string())),
        }?;

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {e}")))?;

        Ok(Self {
            buffer,
            sample_rate,
            max_buffered: sample_rate as usize * MAX_BUFFERED_SECS,
            _stream: stream,
        })
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Appends mono samples for the stream callback to drain, dropping
    /// whatever would not fit under the buffer cap.
    fn enqueue(&self, samples: Vec<f32>) {
        if let Ok(mut buffer) = self.buffer.lock() {
            let available = self.max_buffered.saturating_sub(buffer.len());
            buffer.extend(samples.into_iter().take(available));
        }
    }
}

/// Builds the output stream for the device's sample format. Mono samples
/// are duplicated across all output channels.
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: Arc<Mutex<VecDeque<f32>>>,
    channels: usize,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    use cpal::Sample;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut buffer = match buffer.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                for frame in data.chunks_mut(channels.max(1)) {
                    let sample = buffer.pop_front().unwrap_or(0.0);
                    for slot in frame.iter_mut() {
                        *slot = T::from_sample(sample);
                    }
                }
            },
            |_err| {
                // Stream errors are dropped; playback is best-effort.
            },
            None,
        )
        .map_err(|e| Error::Audio(format!("Failed to build audio stream: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ToastKind;

    #[test]
    fn play_never_panics_without_a_device() {
        // On headless machines the playback thread exits during device
        // setup; sends must still be silent no-ops.
        let player = CuePlayer::spawn();
        for _ in 0..32 {
            player.play(Cue::for_kind(ToastKind::Safety));
        }
    }

    #[test]
    fn player_handle_is_cloneable() {
        let player = CuePlayer::spawn();
        let clone = player.clone();
        clone.play(Cue::for_kind(ToastKind::Error));
    }
}
