use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::{AudioCommand, AudioError, AudioEvent, StartKind, Ticket};
use crate::shared::{PadId, NUM_PADS};

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

const PLAYBACK_GAIN: f32 = 0.8;

// Lives inside the output callback. Commands are applied strictly in the order
// they arrive, which is what keeps a cut's stops ahead of the next start.
pub struct Engine {
    banks: [SampleBuffer; NUM_PADS],
    voices: [Voice; NUM_PADS],
    capturing: Option<PadId>,
    input_rx: Option<Receiver<Vec<StereoFrame>>>, // None when no mic
    event_tx: Option<Sender<AudioEvent>>,
    scratch: Vec<StereoFrame>,
}

impl Engine {
    pub fn new(max_record_frames: usize) -> Self {
        Self {
            banks: std::array::from_fn(|_| SampleBuffer::with_cap(max_record_frames)),
            voices: std::array::from_fn(|_| Voice::default()),
            capturing: None,
            input_rx: None,
            event_tx: None,
            scratch: Vec::new(),
        }
    }

    pub fn set_input_rx(&mut self, rx: Receiver<Vec<StereoFrame>>) {
        self.input_rx = Some(rx);
    }

    pub fn set_event_tx(&mut self, tx: Sender<AudioEvent>) {
        self.event_tx = Some(tx);
    }

    fn reply(&self, pad: PadId, ticket: Ticket, kind: StartKind, result: Result<(), AudioError>) {
        let Some(tx) = &self.event_tx else { return };
        let event = match result {
            Ok(()) => AudioEvent::Started { pad, ticket, kind },
            Err(error) => AudioEvent::Failed { pad, ticket, kind, error },
        };
        let _ = tx.try_send(event);
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::StartCapture { pad, ticket } => {
                let result = self.start_capture(pad);
                self.reply(pad, ticket, StartKind::Capture, result);
            }
            AudioCommand::StopCapture { pad } => {
                if self.capturing == Some(pad) {
                    self.capturing = None;
                }
            }
            AudioCommand::StartPlayback { pad, ticket } => {
                let result = self.start_playback(pad);
                self.reply(pad, ticket, StartKind::Playback, result);
            }
            AudioCommand::StopPlayback { pad } => {
                if let Some(v) = self.voices.get_mut(pad.index()) {
                    v.stop();
                }
            }
        }
    }

    fn start_capture(&mut self, pad: PadId) -> Result<(), AudioError> {
        if self.input_rx.is_none() {
            return Err(AudioError::NoInputDevice);
        }
        let i = pad.index();
        if i >= NUM_PADS {
            return Err(AudioError::EmptyBank);
        }
        // stale mic frames belong to nobody
        self.drain_input();
        self.voices[i].stop();
        self.banks[i].clear();
        self.capturing = Some(pad);
        Ok(())
    }

    fn start_playback(&mut self, pad: PadId) -> Result<(), AudioError> {
        let i = pad.index();
        match self.banks.get(i) {
            Some(bank) if !bank.is_empty() && self.capturing != Some(pad) => {
                self.voices[i].start(PLAYBACK_GAIN);
                Ok(())
            }
            _ => Err(AudioError::EmptyBank),
        }
    }

    // pull mic frames into whichever bank is recording
    pub fn drain_input(&mut self) {
        let Some(rx) = &self.input_rx else { return };
        while let Ok(frames) = rx.try_recv() {
            // past the cap the rest of the take is discarded
            if let Some(pad) = self.capturing
                && !self.banks[pad.index()].is_full()
            {
                self.banks[pad.index()].append(&frames);
            }
        }
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for (voice, bank) in self.voices.iter_mut().zip(self.banks.iter()) {
            voice.render_into(bank, out);
        }
        for f in out.iter_mut() {
            f.left = f.left.clamp(-1.0, 1.0);
            f.right = f.right.clamp(-1.0, 1.0);
        }
    }

    // interleaved output of any channel count
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let n_frames = data.len() / channels;
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.resize(n_frames, StereoFrame::zero());
        self.render_block(&mut scratch);
        for (chunk, f) in data.chunks_exact_mut(channels).zip(scratch.iter()) {
            match chunk {
                [mono] => *mono = (f.left + f.right) * 0.5,
                [l, r, rest @ ..] => {
                    *l = f.left;
                    *r = f.right;
                    rest.fill(0.0);
                }
                [] => {}
            }
        }
        self.scratch = scratch;
    }

    #[cfg(test)]
    pub fn bank_len(&self, pad: PadId) -> usize {
        self.banks.get(pad.index()).map_or(0, SampleBuffer::len)
    }
}
