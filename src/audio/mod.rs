use anyhow::Context;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio_api::{AudioCommand, AudioError, AudioEvent};

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;

use engine::Engine;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    event_rx: Receiver<AudioEvent>,
    has_input: bool,
    _output_stream: cpal::Stream,
    _input_stream: Option<cpal::Stream>, // None when no mic available
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) -> Result<(), AudioError> {
        self.tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) | TrySendError::Disconnected(_) => AudioError::QueueClosed,
        })
    }

    pub fn poll_event(&self) -> Option<AudioEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn has_input(&self) -> bool {
        self.has_input
    }
}

pub fn start_audio(max_record_secs: u32) -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;
    let max_record_frames = max_record_secs as usize * sample_rate as usize;

    let (input_tx, input_rx) = crossbeam_channel::bounded::<Vec<StereoFrame>>(2048);
    let (event_tx, event_rx) = crossbeam_channel::bounded::<AudioEvent>(256);

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let input_stream = try_build_input_stream(&host, sample_rate, input_tx);

            let mut engine = Engine::new(max_record_frames);
            if input_stream.is_some() {
                engine.set_input_rx(input_rx);
            }
            engine.set_event_tx(event_tx);

            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, engine, channels)?;
            output_stream.play().context("failed to play output stream")?;

            log::info!(
                "audio started ({} ch @ {} Hz, mic {})",
                channels,
                sample_rate,
                if input_stream.is_some() { "on" } else { "off" }
            );

            Ok(AudioHandle {
                tx,
                event_rx,
                has_input: input_stream.is_some(),
                _output_stream: output_stream,
                _input_stream: input_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    mut engine: Engine,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            // mic first, so a stop applied below sees everything captured up to now
            engine.drain_input();
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            engine.render_interleaved(data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// ── Input stream ──────────────────────────────────────────────────

fn try_build_input_stream(
    host: &cpal::Host,
    target_sample_rate: cpal::SampleRate,
    tx: Sender<Vec<StereoFrame>>,
) -> Option<cpal::Stream> {
    let Some(device) = host.default_input_device() else {
        log::warn!("no default input device, recording disabled");
        return None;
    };

    let supported = device.default_input_config().ok()?;
    let mut stream_config: cpal::StreamConfig = supported.into();
    stream_config.sample_rate = target_sample_rate;

    let in_channels = stream_config.channels as usize;

    let err_fn = |err| log::error!("audio input stream error: {err}");

    let stream = match device.build_input_stream(
        &stream_config,
        move |data: &[f32], _info: &cpal::InputCallbackInfo| {
            let frames: Vec<StereoFrame> = if in_channels == 1 {
                data.iter().map(|&s| StereoFrame::mono(s)).collect()
            } else {
                data.chunks_exact(in_channels)
                    .map(|c| StereoFrame { left: c[0], right: c[1] })
                    .collect()
            };
            let _ = tx.try_send(frames);
        },
        err_fn,
        None,
    ) {
        Ok(stream) => stream,
        Err(e) => {
            log::warn!("could not open input stream: {e}");
            return None;
        }
    };

    if let Err(e) = stream.play() {
        log::warn!("could not start input stream: {e}");
        return None;
    }

    Some(stream)
}
