// Right hand reference poses, in parent space, ordered like the SteamVR hand skeleton.

use rht_openvr::{BoneTransform, HmdQuaternionf, HmdVector4};

pub const BONE_COUNT: usize = 31;

pub type HandSkeleton = [BoneTransform; BONE_COUNT];

#[repr(usize)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandSkeletonBone {
    Root,
    Wrist,
    Thumb0,
    Thumb1,
    Thumb2,
    Thumb3,
    IndexFinger0,
    IndexFinger1,
    IndexFinger2,
    IndexFinger3,
    IndexFinger4,
    MiddleFinger0,
    MiddleFinger1,
    MiddleFinger2,
    MiddleFinger3,
    MiddleFinger4,
    RingFinger0,
    RingFinger1,
    RingFinger2,
    RingFinger3,
    RingFinger4,
    PinkyFinger0,
    PinkyFinger1,
    PinkyFinger2,
    PinkyFinger3,
    PinkyFinger4,
    AuxThumb,
    AuxIndexFinger,
    AuxMiddleFinger,
    AuxRingFinger,
    AuxPinkyFinger,
}

const fn bone(position: [f32; 3], orientation: [f32; 4]) -> BoneTransform {
    BoneTransform {
        position: HmdVector4 {
            v: [position[0], position[1], position[2], 1.0],
        },
        orientation: HmdQuaternionf {
            w: orientation[0],
            x: orientation[1],
            y: orientation[2],
            z: orientation[3],
        },
    }
}

const OPEN_HAND: HandSkeleton = [
    // root, wrist
    bone([0.00000, 0.00000, 0.00000], [0.00000, -0.00000, 1.00000, 0.00000]),
    bone([-0.00016, -0.00003, -0.00063], [1.00000, -0.00000, -0.00000, 0.00000]),
    // thumb
    bone([0.01791, 0.02918, 0.02530], [0.56781, -0.43792, 0.68663, -0.11983]),
    bone([-0.04041, -0.00000, 0.00000], [0.99031, 0.04887, 0.05609, 0.11728]),
    bone([-0.03252, -0.00000, -0.00000], [0.99493, 0.08159, 0.04521, -0.03764]),
    bone([-0.03046, 0.00000, 0.00000], [1.00000, -0.00000, -0.00000, 0.00000]),
    // index
    bone([0.00156, 0.02107, 0.01479], [0.53106, -0.55075, 0.53958, 0.35143]),
    bone([-0.07380, -0.00000, -0.00000], [0.99318, 0.06183, 0.04100, 0.08997]),
    bone([-0.04329, 0.00000, 0.00000], [0.98958, -0.14077, -0.01481, -0.02620]),
    bone([-0.02828, -0.00000, -0.00000], [0.99707, 0.00003, -0.00117, 0.07646]),
    bone([-0.02282, -0.00000, 0.00000], [1.00000, -0.00000, 0.00000, -0.00000]),
    // middle
    bone([-0.00218, 0.00712, 0.01632], [0.56175, -0.53342, 0.47299, 0.41974]),
    bone([-0.07089, 0.00000, 0.00000], [0.99087, -0.03929, -0.01545, 0.12805]),
    bone([-0.04311, -0.00000, 0.00000], [0.99882, -0.04623, -0.01254, -0.00778]),
    bone([-0.03327, 0.00000, -0.00000], [0.99920, -0.03577, 0.00817, 0.01562]),
    bone([-0.02589, 0.00000, -0.00000], [1.00000, 0.00000, -0.00000, 0.00000]),
    // ring
    bone([-0.00051, -0.00655, 0.01635], [0.55014, -0.51669, 0.42989, 0.49555]),
    bone([-0.06597, 0.00000, 0.00000], [0.98958, -0.04109, -0.08942, 0.10511]),
    bone([-0.04033, -0.00000, -0.00000], [0.99475, -0.07026, 0.04928, -0.05571]),
    bone([-0.02849, 0.00000, 0.00000], [0.99079, 0.00020, -0.00426, 0.13535]),
    bone([-0.02243, 0.00000, -0.00000], [1.00000, 0.00000, 0.00000, -0.00000]),
    // pinky
    bone([0.00248, -0.01898, 0.01521], [0.51533, -0.48576, 0.34675, 0.61502]),
    bone([-0.06286, 0.00000, -0.00000], [0.99505, 0.00921, -0.09085, 0.03929]),
    bone([-0.02987, -0.00000, 0.00000], [0.99406, -0.09116, -0.01704, -0.05688]),
    bone([-0.01798, 0.00000, -0.00000], [0.99768, -0.02291, 0.01686, 0.06191]),
    bone([-0.01802, -0.00000, 0.00000], [1.00000, -0.00000, 0.00000, -0.00000]),
    // aux
    bone([0.02218, 0.07865, 0.07720], [0.54403, -0.29496, 0.75779, -0.20688]),
    bone([-0.01112, 0.05525, 0.15428], [0.42038, -0.51341, 0.59483, 0.45372]),
    bone([-0.01291, 0.00792, 0.16137], [0.44600, -0.51675, 0.46957, 0.55996]),
    bone([-0.00763, -0.02903, 0.14747], [0.40717, -0.47395, 0.43188, 0.65043]),
    bone([0.00586, -0.05994, 0.11671], [0.47050, -0.46974, 0.24892, 0.70428]),
];

const FIST: HandSkeleton = [
    // root, wrist
    bone([0.00000, 0.00000, 0.00000], [0.00000, -0.00000, -1.00000, -0.00000]),
    bone([-0.00016, -0.00003, -0.00063], [1.00000, 0.00000, -0.00000, 0.00000]),
    // thumb
    bone([0.01791, 0.02918, 0.02530], [0.54119, -0.27639, 0.77304, -0.18203]),
    bone([-0.04041, -0.00000, 0.00000], [0.96917, 0.00006, -0.00137, 0.24638]),
    bone([-0.03252, -0.00000, -0.00000], [0.98817, 0.00010, 0.00140, 0.15334]),
    bone([-0.03046, 0.00000, 0.00000], [1.00000, 0.00000, -0.00000, 0.00000]),
    // index
    bone([0.00218, 0.01773, 0.01625], [0.57080, -0.51658, 0.53668, 0.34542]),
    bone([-0.07407, -0.00037, -0.00460], [0.64992, -0.14599, 0.06483, 0.74302]),
    bone([-0.04329, 0.00000, 0.00000], [0.76851, -0.05789, -0.01468, 0.63705]),
    bone([-0.02828, -0.00000, -0.00000], [0.81120, -0.06082, -0.13770, 0.56505]),
    bone([-0.02282, -0.00000, 0.00000], [1.00000, -0.00000, 0.00000, -0.00000]),
    // middle
    bone([-0.00231, 0.00559, 0.01632], [0.55347, -0.51293, 0.49363, 0.43232]),
    bone([-0.07089, 0.00000, 0.00000], [0.70241, -0.01896, 0.03782, 0.71051]),
    bone([-0.04311, -0.00000, 0.00000], [0.75555, -0.03905, 0.03900, 0.65276]),
    bone([-0.03327, 0.00000, -0.00000], [0.74411, -0.01136, -0.06222, 0.66506]),
    bone([-0.02589, 0.00000, -0.00000], [1.00000, 0.00000, -0.00000, 0.00000]),
    // ring
    bone([-0.00051, -0.00655, 0.01635], [0.55014, -0.51669, 0.42989, 0.49555]),
    bone([-0.06537, -0.00070, 0.00205], [0.70078, 0.07535, 0.01841, 0.70915]),
    bone([-0.04033, -0.00000, -0.00000], [0.71382, 0.00833, 0.07700, 0.69603]),
    bone([-0.02849, 0.00000, 0.00000], [0.78821, 0.05548, 0.13836, 0.59708]),
    bone([-0.02243, 0.00000, -0.00000], [1.00000, 0.00000, 0.00000, -0.00000]),
    // pinky
    bone([-0.00363, -0.01205, 0.01982], [0.51533, -0.48576, 0.34675, 0.61502]),
    bone([-0.06286, 0.00000, -0.00000], [0.75876, 0.16471, 0.00588, 0.63017]),
    bone([-0.02987, -0.00000, 0.00000], [0.70376, -0.00134, -0.01480, 0.71028]),
    bone([-0.01798, 0.00000, -0.00000], [0.82872, -0.00344, 0.00593, 0.55962]),
    bone([-0.01802, -0.00000, 0.00000], [1.00000, -0.00000, 0.00000, -0.00000]),
    // aux
    bone([0.03928, 0.06008, 0.08449], [0.56911, 0.04861, 0.81959, 0.04504]),
    bone([0.03767, 0.02825, 0.06347], [0.57495, -0.76383, -0.21599, -0.19834]),
    bone([0.03942, 0.00844, 0.05936], [0.67319, -0.71387, -0.15013, -0.12112]),
    bone([0.03506, -0.01146, 0.05747], [0.80517, -0.55694, -0.13109, -0.15599]),
    bone([0.02885, -0.03045, 0.06792], [0.69794, -0.65475, -0.18023, -0.22736]),
];

pub static RIGHT_OPEN_HAND: HandSkeleton = OPEN_HAND;

pub static RIGHT_FIST: HandSkeleton = FIST;

/// Passed once when the skeleton component is created. The open hand is as far as the fingers
/// extend while holding the controller.
pub static RIGHT_GRIP_LIMIT: HandSkeleton = OPEN_HAND;
