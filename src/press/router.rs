use ratatui::layout::{Position, Rect};

use crate::shared::ControlId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionId(usize);

#[derive(Clone, Debug)]
struct Region {
    rect: Rect,
    parent: Option<RegionId>,
    control: Option<ControlId>, // None for plain containers
}

/// Explicit registration table for raw contact routing.
///
/// Controls and the containers around them register their hit rectangles.
/// A contact point resolves to the innermost region that contains it, then
/// walks up the parent chain to the nearest region that owns a control.
/// Only where a contact starts is looked up here; the board remembers the
/// result and sends the contact's end to the same control.
#[derive(Clone, Debug, Default)]
pub struct TouchRouter {
    regions: Vec<Region>,
}

impl TouchRouter {
    pub fn new() -> Self {
        Self::default()
    }

    // layout changed, everything registers again
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register_container(&mut self, rect: Rect, parent: Option<RegionId>) -> RegionId {
        self.push(Region { rect, parent, control: None })
    }

    pub fn register_control(
        &mut self,
        rect: Rect,
        parent: Option<RegionId>,
        control: ControlId,
    ) -> RegionId {
        self.push(Region { rect, parent, control: Some(control) })
    }

    fn push(&mut self, region: Region) -> RegionId {
        self.regions.push(region);
        RegionId(self.regions.len() - 1)
    }

    fn depth(&self, id: RegionId) -> usize {
        let mut depth = 0;
        let mut cur = self.regions[id.0].parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.regions.get(p.0).and_then(|r| r.parent);
        }
        depth
    }

    pub fn resolve(&self, x: u16, y: u16) -> Option<ControlId> {
        let pos = Position { x, y };
        // innermost hit; later registrations win ties
        let hit = self
            .regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.rect.contains(pos))
            .map(|(i, _)| RegionId(i))
            .max_by_key(|id| (self.depth(*id), id.0))?;

        let mut cur = Some(hit);
        while let Some(id) = cur {
            let region = self.regions.get(id.0)?;
            if let Some(control) = region.control {
                return Some(control);
            }
            cur = region.parent;
        }
        None
    }
}
