use std::cell::Cell;

use crate::audio_api::{AudioOutbox, StartKind, Ticket};
use crate::shared::{PadColor, PadId};

use super::mode::InteractionMode;
use super::registry::PadRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentState {
    Empty,
    Recording,
    Armed,
    Playing,
}

// a start that the engine hasn't confirmed yet, and where to go back to if it fails
#[derive(Clone, Copy, Debug)]
struct PendingStart {
    ticket: Ticket,
    kind: StartKind,
    revert_to: ContentState,
}

/// One pad slot's state machine.
///
/// Bookkeeping happens synchronously at press time; the audio work it implies
/// is queued on the outbox and confirmed later. State sits in `Cell`s so the
/// registry can cut a pad, including the one currently handling a press,
/// through a shared handle.
#[derive(Debug)]
pub struct PadController {
    id: PadId,
    state: Cell<ContentState>,
    pending: Cell<Option<PendingStart>>,
}

impl PadController {
    pub fn new(id: PadId) -> Self {
        Self {
            id,
            state: Cell::new(ContentState::Empty),
            pending: Cell::new(None),
        }
    }

    pub fn id(&self) -> PadId {
        self.id
    }

    pub fn state(&self) -> ContentState {
        self.state.get()
    }

    fn set_state(&self, next: ContentState) {
        let prev = self.state.replace(next);
        if prev != next {
            log::debug!("pad {} {:?} -> {:?}", self.id.0, prev, next);
        }
    }

    pub fn on_press_begin(
        &self,
        mode: &mut InteractionMode,
        registry: &PadRegistry,
        out: &mut AudioOutbox,
    ) {
        if mode.selecting_bank_to_record {
            self.begin_recording(mode, out);
            return;
        }
        match (self.state.get(), mode.cutting) {
            (ContentState::Armed, true) => {
                registry.broadcast_cut(out);
                self.begin_playing(out);
            }
            (ContentState::Armed, false) => self.begin_playing(out),
            (ContentState::Empty, true) => {
                registry.broadcast_cut(out);
            }
            _ => {}
        }
    }

    pub fn on_press_end(&self, mode: &mut InteractionMode, out: &mut AudioOutbox) {
        match self.state.get() {
            ContentState::Recording => {
                out.stop_capture(self.id);
                self.set_state(ContentState::Armed);
                mode.finish_recording();
            }
            ContentState::Playing if !mode.hanging => {
                out.stop_playback(self.id);
                self.set_state(ContentState::Armed);
            }
            ContentState::Playing => {
                log::debug!("pad {} hung", self.id.0);
            }
            ContentState::Empty | ContentState::Armed => {}
        }
    }

    /// Stop playback if playing. Safe to call on a pad in any state.
    pub fn cut_audio(&self, out: &mut AudioOutbox) {
        if self.state.get() == ContentState::Playing {
            out.stop_playback(self.id);
            self.set_state(ContentState::Armed);
        }
    }

    fn begin_recording(&self, mode: &mut InteractionMode, out: &mut AudioOutbox) {
        mode.claim_bank();
        let revert_to = match self.state.get() {
            ContentState::Empty => ContentState::Empty,
            ContentState::Playing => {
                // a hung pad being recorded over
                out.stop_playback(self.id);
                ContentState::Armed
            }
            ContentState::Recording | ContentState::Armed => ContentState::Armed,
        };
        let ticket = out.start_capture(self.id);
        self.pending.set(Some(PendingStart {
            ticket,
            kind: StartKind::Capture,
            revert_to,
        }));
        self.set_state(ContentState::Recording);
    }

    fn begin_playing(&self, out: &mut AudioOutbox) {
        let ticket = out.start_playback(self.id);
        self.pending.set(Some(PendingStart {
            ticket,
            kind: StartKind::Playback,
            revert_to: ContentState::Armed,
        }));
        self.set_state(ContentState::Playing);
    }

    pub fn on_start_confirmed(&self, ticket: Ticket) {
        if self.pending.get().is_some_and(|p| p.ticket == ticket) {
            self.pending.set(None);
        }
    }

    /// Roll back the transition behind a rejected start. Returns false when the
    /// ticket is stale (the pad has moved on since).
    pub fn on_start_failed(&self, ticket: Ticket, mode: &mut InteractionMode) -> bool {
        let Some(pending) = self.pending.get().filter(|p| p.ticket == ticket) else {
            return false;
        };
        self.pending.set(None);
        match pending.kind {
            StartKind::Capture => {
                if self.state.get() == ContentState::Recording {
                    mode.finish_recording();
                }
                self.set_state(pending.revert_to);
            }
            StartKind::Playback => {
                if self.state.get() == ContentState::Playing {
                    self.set_state(pending.revert_to);
                }
            }
        }
        true
    }

    pub fn color(&self, mode: &InteractionMode) -> PadColor {
        match self.state.get() {
            ContentState::Recording => PadColor::Red,
            _ if mode.selecting_bank_to_record => PadColor::Red,
            ContentState::Playing => PadColor::Green,
            ContentState::Armed => PadColor::Yellow,
            ContentState::Empty => PadColor::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::audio_api::AudioCommand;

    fn pad(n: u8) -> Rc<PadController> {
        Rc::new(PadController::new(PadId(n)))
    }

    // drive a pad from empty to armed through a normal recording
    fn arm(p: &PadController, mode: &mut InteractionMode, reg: &PadRegistry, out: &mut AudioOutbox) {
        mode.toggle_select_mode();
        p.on_press_begin(mode, reg, out);
        p.on_press_end(mode, out);
        out.drain();
    }

    #[test]
    fn test_select_mode_claims_any_pad() {
        let p = pad(2);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode { selecting_bank_to_record: true, ..Default::default() };

        p.on_press_begin(&mut mode, &reg, &mut out);
        assert_eq!(p.state(), ContentState::Recording);
        assert!(!mode.selecting_bank_to_record);
        assert!(mode.recording_in_progress);
        assert!(matches!(out.pending(), [AudioCommand::StartCapture { pad: PadId(2), .. }]));

        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.state(), ContentState::Armed);
        assert!(!mode.recording_in_progress);
        assert_eq!(out.pending()[1], AudioCommand::StopCapture { pad: PadId(2) });
    }

    #[test]
    fn test_armed_press_plays_and_release_stops() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        arm(&p, &mut mode, &reg, &mut out);

        p.on_press_begin(&mut mode, &reg, &mut out);
        assert_eq!(p.state(), ContentState::Playing);
        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.state(), ContentState::Armed);
        let stops = out
            .drain()
            .into_iter()
            .filter(|c| matches!(c, AudioCommand::StopPlayback { .. }))
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_hanging_latches_playback() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        arm(&p, &mut mode, &reg, &mut out);

        mode.hanging = true;
        p.on_press_begin(&mut mode, &reg, &mut out);
        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.state(), ContentState::Playing);
        assert!(!out.pending().iter().any(|c| matches!(c, AudioCommand::StopPlayback { .. })));
    }

    #[test]
    fn test_empty_pad_without_cutting_is_inert() {
        let p = pad(1);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        p.on_press_begin(&mut mode, &reg, &mut out);
        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.state(), ContentState::Empty);
        assert!(out.pending().is_empty());
    }

    #[test]
    fn test_cut_audio_is_idempotent() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();

        p.cut_audio(&mut out);
        assert_eq!(p.state(), ContentState::Empty);
        assert!(out.pending().is_empty());

        arm(&p, &mut mode, &reg, &mut out);
        p.on_press_begin(&mut mode, &reg, &mut out);
        out.drain();
        p.cut_audio(&mut out);
        p.cut_audio(&mut out);
        assert_eq!(p.state(), ContentState::Armed);
        assert_eq!(out.pending(), &[AudioCommand::StopPlayback { pad: PadId(0) }]);
    }

    #[test]
    fn test_failed_capture_reverts_to_empty() {
        let p = pad(3);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode { selecting_bank_to_record: true, ..Default::default() };
        p.on_press_begin(&mut mode, &reg, &mut out);
        let Some(AudioCommand::StartCapture { ticket, .. }) = out.pending().first().copied() else {
            panic!("expected a capture start");
        };

        assert!(p.on_start_failed(ticket, &mut mode));
        assert_eq!(p.state(), ContentState::Empty);
        assert!(!mode.recording_in_progress);

        // the release that follows has nothing left to close
        out.drain();
        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.state(), ContentState::Empty);
        assert!(out.pending().is_empty());
    }

    #[test]
    fn test_failed_capture_after_release_still_reverts() {
        let p = pad(3);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode { selecting_bank_to_record: true, ..Default::default() };
        p.on_press_begin(&mut mode, &reg, &mut out);
        p.on_press_end(&mut mode, &mut out);
        let Some(AudioCommand::StartCapture { ticket, .. }) = out.pending().first().copied() else {
            panic!("expected a capture start");
        };
        assert!(p.on_start_failed(ticket, &mut mode));
        assert_eq!(p.state(), ContentState::Empty);
    }

    #[test]
    fn test_failed_playback_reverts_to_armed() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        arm(&p, &mut mode, &reg, &mut out);
        p.on_press_begin(&mut mode, &reg, &mut out);
        let Some(AudioCommand::StartPlayback { ticket, .. }) = out.pending().first().copied() else {
            panic!("expected a playback start");
        };
        assert!(p.on_start_failed(ticket, &mut mode));
        assert_eq!(p.state(), ContentState::Armed);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        arm(&p, &mut mode, &reg, &mut out);
        p.on_press_begin(&mut mode, &reg, &mut out);
        let Some(AudioCommand::StartPlayback { ticket, .. }) = out.pending().first().copied() else {
            panic!("expected a playback start");
        };
        p.on_start_confirmed(ticket);
        assert!(!p.on_start_failed(ticket, &mut mode));
        assert!(!p.on_start_failed(Ticket(9999), &mut mode));
        assert_eq!(p.state(), ContentState::Playing);
    }

    #[test]
    fn test_colors_follow_state() {
        let p = pad(0);
        let reg = PadRegistry::new();
        let mut out = AudioOutbox::new();
        let mut mode = InteractionMode::default();
        assert_eq!(p.color(&mode), PadColor::Default);
        mode.selecting_bank_to_record = true;
        assert_eq!(p.color(&mode), PadColor::Red);
        p.on_press_begin(&mut mode, &reg, &mut out);
        assert_eq!(p.color(&mode), PadColor::Red);
        p.on_press_end(&mut mode, &mut out);
        assert_eq!(p.color(&mode), PadColor::Yellow);
        p.on_press_begin(&mut mode, &reg, &mut out);
        assert_eq!(p.color(&mode), PadColor::Green);
    }
}
