use thiserror::Error;

use crate::shared::PadId;

// Every start handed to the engine gets a ticket so a late failure can be
// matched against the transition that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    StartCapture { pad: PadId, ticket: Ticket },
    StopCapture { pad: PadId },
    StartPlayback { pad: PadId, ticket: Ticket },
    StopPlayback { pad: PadId },
}

impl AudioCommand {
    pub fn pad(&self) -> PadId {
        match *self {
            AudioCommand::StartCapture { pad, .. }
            | AudioCommand::StopCapture { pad }
            | AudioCommand::StartPlayback { pad, .. }
            | AudioCommand::StopPlayback { pad } => pad,
        }
    }

    // the reply a start would have produced had the engine refused it
    pub fn rejected(&self, error: AudioError) -> Option<AudioEvent> {
        match *self {
            AudioCommand::StartCapture { pad, ticket } => Some(AudioEvent::Failed {
                pad,
                ticket,
                kind: StartKind::Capture,
                error,
            }),
            AudioCommand::StartPlayback { pad, ticket } => Some(AudioEvent::Failed {
                pad,
                ticket,
                kind: StartKind::Playback,
                error,
            }),
            AudioCommand::StopCapture { .. } | AudioCommand::StopPlayback { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartKind {
    Capture,
    Playback,
}

// Replies from the engine. Stops never fail, so only starts report back.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    Started { pad: PadId, ticket: Ticket, kind: StartKind },
    Failed { pad: PadId, ticket: Ticket, kind: StartKind, error: AudioError },
}

/// Reasons the audio collaborator rejects a lifecycle call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    /// No microphone stream was opened, so there is nothing to capture from.
    #[error("no input device available for recording")]
    NoInputDevice,

    /// The pad's bank holds no audio yet.
    #[error("nothing recorded on this pad")]
    EmptyBank,

    /// The command queue to the audio thread is full or disconnected.
    #[error("audio command queue unavailable")]
    QueueClosed,
}

// Commands queued by the pads during one input event. The board drains it and
// forwards everything to the audio thread in order, so a broadcast's stops
// always land before the start that follows them.
#[derive(Debug, Default)]
pub struct AudioOutbox {
    cmds: Vec<AudioCommand>,
    next_ticket: u64,
}

impl AudioOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    pub fn start_capture(&mut self, pad: PadId) -> Ticket {
        let ticket = self.ticket();
        self.cmds.push(AudioCommand::StartCapture { pad, ticket });
        ticket
    }

    pub fn stop_capture(&mut self, pad: PadId) {
        self.cmds.push(AudioCommand::StopCapture { pad });
    }

    pub fn start_playback(&mut self, pad: PadId) -> Ticket {
        let ticket = self.ticket();
        self.cmds.push(AudioCommand::StartPlayback { pad, ticket });
        ticket
    }

    pub fn stop_playback(&mut self, pad: PadId) {
        self.cmds.push(AudioCommand::StopPlayback { pad });
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[AudioCommand] {
        &self.cmds
    }

    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.cmds)
    }
}
