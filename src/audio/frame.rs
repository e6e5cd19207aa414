// One stereo frame, the unit everything in the engine moves around
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn zero() -> Self {
        Self::default()
    }

    // mic input is usually mono, spread it to both sides
    pub fn mono(s: f32) -> Self {
        Self { left: s, right: s }
    }
}
