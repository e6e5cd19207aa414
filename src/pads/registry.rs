use std::rc::{Rc, Weak};

use crate::audio_api::AudioOutbox;
use crate::shared::{PadId, NUM_PADS};

use super::controller::PadController;

/// Fixed table of pad handles, indexed by slot. Holds weak references only;
/// the board owns the controllers. Slots fill in as pads mount and are never
/// reassigned.
#[derive(Debug, Default)]
pub struct PadRegistry {
    slots: [Weak<PadController>; NUM_PADS],
}

impl PadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // returns false if the slot was already taken by a live pad
    pub fn mount(&mut self, pad: &Rc<PadController>) -> bool {
        let Some(slot) = self.slots.get_mut(pad.id().index()) else {
            log::warn!("pad {} has no slot", pad.id().0);
            return false;
        };
        if slot.upgrade().is_some() {
            log::warn!("slot {} already mounted", pad.id().0);
            return false;
        }
        *slot = Rc::downgrade(pad);
        true
    }

    pub fn get(&self, id: PadId) -> Option<Rc<PadController>> {
        self.slots.get(id.index()).and_then(Weak::upgrade)
    }

    /// Call `cut_audio` on every mounted slot, in slot order, once each.
    /// Unmounted slots are skipped. Returns how many pads were visited.
    pub fn broadcast_cut(&self, out: &mut AudioOutbox) -> usize {
        let mut visited = 0;
        for pad in self.slots.iter().filter_map(Weak::upgrade) {
            pad.cut_audio(out);
            visited += 1;
        }
        log::debug!("broadcast cut reached {visited} pads");
        visited
    }
}
