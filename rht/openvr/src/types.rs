// Layouts follow openvr_driver.h. Everything in here crosses the ABI boundary by value or by
// pointer, so field order and widths must not change.

use bytemuck::Zeroable;
use glam::{DVec3, Vec3};
use std::fmt::{self, Display};

pub type TrackedDeviceIndex = u32;
pub type PropertyContainerHandle = u64;
pub type PropertyTypeTag = u32;

pub const TRACKED_DEVICE_INDEX_HMD: TrackedDeviceIndex = 0;

pub const INT32_PROPERTY_TAG: PropertyTypeTag = 2;
pub const STRING_PROPERTY_TAG: PropertyTypeTag = 5;

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Zeroable)]
pub struct InputComponentHandle(pub u64);

impl InputComponentHandle {
    pub const INVALID: Self = Self(0);
}

macro_rules! host_code {
    (
        $(#[$meta:meta])*
        $name:ident, success = $success:ident {
            $($variant:ident = $value:literal => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Zeroable)]
        pub struct $name(pub i32);

        impl $name {
            $(pub const $variant: Self = Self($value);)+

            pub fn is_ok(self) -> bool {
                self == Self::$success
            }

            /// Ok for the success value, the code itself otherwise.
            pub fn into_result(self) -> Result<(), Self> {
                if self.is_ok() {
                    Ok(())
                } else {
                    Err(self)
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Self::$variant => write!(f, "{} ({})", $text, $value),)+
                    Self(other) => write!(f, "{} code {}", stringify!($name), other),
                }
            }
        }

        impl std::error::Error for $name {}
    };
}

host_code! {
    /// EVRInitError
    InitError, success = NONE {
        NONE = 0 => "None",
        INIT_INTERFACE_NOT_FOUND = 105 => "Init_InterfaceNotFound",
        DRIVER_FAILED = 200 => "Driver_Failed",
    }
}

host_code! {
    /// EVRInputError
    InputError, success = NONE {
        NONE = 0 => "None",
        NAME_NOT_FOUND = 1 => "NameNotFound",
        WRONG_TYPE = 2 => "WrongType",
        INVALID_HANDLE = 3 => "InvalidHandle",
        INVALID_PARAM = 4 => "InvalidParam",
        INVALID_DEVICE = 9 => "InvalidDevice",
        INVALID_SKELETON = 10 => "InvalidSkeleton",
        INVALID_BONE_COUNT = 11 => "InvalidBoneCount",
    }
}

host_code! {
    /// ETrackedPropertyError
    PropertyError, success = SUCCESS {
        SUCCESS = 0 => "Success",
        WRONG_DATA_TYPE = 1 => "WrongDataType",
        WRONG_DEVICE_CLASS = 2 => "WrongDeviceClass",
        BUFFER_TOO_SMALL = 3 => "BufferTooSmall",
        UNKNOWN_PROPERTY = 4 => "UnknownProperty",
        INVALID_DEVICE = 5 => "InvalidDevice",
        STRING_EXCEEDS_MAXIMUM_LENGTH = 8 => "StringExceedsMaximumLength",
        PERMISSION_DENIED = 10 => "PermissionDenied",
        INVALID_OPERATION = 11 => "InvalidOperation",
        INVALID_CONTAINER = 15 => "InvalidContainer",
    }
}

host_code! {
    /// ETrackingResult
    TrackingResult, success = RUNNING_OK {
        UNINITIALIZED = 1 => "Uninitialized",
        CALIBRATING_IN_PROGRESS = 100 => "Calibrating_InProgress",
        CALIBRATING_OUT_OF_RANGE = 101 => "Calibrating_OutOfRange",
        RUNNING_OK = 200 => "Running_OK",
        RUNNING_OUT_OF_RANGE = 201 => "Running_OutOfRange",
        FALLBACK_ROTATION_ONLY = 300 => "Fallback_RotationOnly",
    }
}

#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeviceClass {
    Invalid = 0,
    Hmd = 1,
    Controller = 2,
    GenericTracker = 3,
    TrackingReference = 4,
    DisplayRedirect = 5,
}

#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControllerRole {
    Invalid = 0,
    LeftHand = 1,
    RightHand = 2,
    OptOut = 3,
    Treadmill = 4,
    Stylus = 5,
}

#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkeletalTrackingLevel {
    Estimated = 0,
    Partial = 1,
    Full = 2,
}

#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkeletalMotionRange {
    WithController = 0,
    WithoutController = 1,
}

/// Subset of ETrackedDeviceProperty. The suffix is the value type the host expects.
#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeviceProperty {
    TrackingSystemNameString = 1000,
    ModelNumberString = 1001,
    SerialNumberString = 1002,
    RenderModelNameString = 1003,
    ManufacturerNameString = 1005,
    DeviceClassInt32 = 1029,
    InputProfilePathString = 1037,
    ControllerRoleHintInt32 = 3007,
    ControllerTypeString = 7000,
    LegacyInputProfileString = 7001,
}

#[repr(i32)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PropertyWriteType {
    Set = 0,
}

/// One entry of IVRProperties::WritePropertyBatch.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PropertyWrite {
    pub prop: DeviceProperty,
    pub write_type: PropertyWriteType,
    pub set_error: PropertyError,
    pub buffer: *mut std::ffi::c_void,
    pub buffer_size: u32,
    pub tag: PropertyTypeTag,
    pub error: PropertyError,
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct HmdQuaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HmdQuaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct HmdQuaternionf {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct HmdVector4 {
    pub v: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct HmdVector3 {
    pub v: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct HmdMatrix34 {
    pub m: [[f32; 4]; 3],
}

impl HmdMatrix34 {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }
}

/// VRBoneTransform_t, given in parent space.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable)]
pub struct BoneTransform {
    pub position: HmdVector4,
    pub orientation: HmdQuaternionf,
}

/// DriverPose_t, what a device reports about itself.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Zeroable)]
pub struct DriverPose {
    pub pose_time_offset: f64,
    pub q_world_from_driver_rotation: HmdQuaternion,
    pub vec_world_from_driver_translation: [f64; 3],
    pub q_driver_from_head_rotation: HmdQuaternion,
    pub vec_driver_from_head_translation: [f64; 3],
    pub vec_position: [f64; 3],
    pub vec_velocity: [f64; 3],
    pub vec_acceleration: [f64; 3],
    pub q_rotation: HmdQuaternion,
    pub vec_angular_velocity: [f64; 3],
    pub vec_angular_acceleration: [f64; 3],
    pub result: TrackingResult,
    pub pose_is_valid: bool,
    pub will_drift_in_yaw: bool,
    pub should_apply_head_model: bool,
    pub device_is_connected: bool,
}

impl DriverPose {
    pub fn position(&self) -> DVec3 {
        DVec3::from_array(self.vec_position)
    }
}

impl Default for DriverPose {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// TrackedDevicePose_t, what the host reports about a device.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Zeroable)]
pub struct TrackedDevicePose {
    pub device_to_absolute_tracking: HmdMatrix34,
    pub velocity: HmdVector3,
    pub angular_velocity: HmdVector3,
    pub tracking_result: TrackingResult,
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
}

impl Default for TrackedDevicePose {
    fn default() -> Self {
        Self::zeroed()
    }
}
