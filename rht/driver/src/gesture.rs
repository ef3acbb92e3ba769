use crate::bones::{HandSkeleton, RIGHT_FIST, RIGHT_OPEN_HAND};

/// Length of one open-close animation cycle, in update frames.
pub const ANIMATION_CYCLE_FRAMES: u64 = 200;
/// Frames at the start of each cycle that show the open hand.
pub const OPEN_HAND_FRAMES: u64 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandGesture {
    OpenHand,
    Fist,
}

impl HandGesture {
    pub fn for_frame(frame: u64) -> Self {
        if frame % ANIMATION_CYCLE_FRAMES < OPEN_HAND_FRAMES {
            Self::OpenHand
        } else {
            Self::Fist
        }
    }

    pub fn transforms(self) -> &'static HandSkeleton {
        match self {
            Self::OpenHand => &RIGHT_OPEN_HAND,
            Self::Fist => &RIGHT_FIST,
        }
    }
}
