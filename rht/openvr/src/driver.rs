use crate::types::*;
use std::{ffi::c_void, ptr::NonNull, sync::Arc};

/// IVRServerDriverHost, the part of it this driver family needs.
pub trait ServerDriverHost: Send + Sync {
    /// Announces a device. The host activates it later through the driver object.
    fn tracked_device_added(
        &self,
        serial_number: &str,
        device_class: DeviceClass,
        driver: Arc<dyn TrackedDeviceServerDriver>,
    ) -> bool;

    fn tracked_device_pose_updated(&self, device_id: TrackedDeviceIndex, pose: &DriverPose);

    /// Fills `poses` with the raw poses of the first `poses.len()` devices, starting at the HMD.
    fn get_raw_tracked_device_poses(
        &self,
        predicted_seconds_from_now: f32,
        poses: &mut [TrackedDevicePose],
    );
}

/// IVRDriverInput
pub trait DriverInput: Send + Sync {
    fn create_skeleton_component(
        &self,
        container: PropertyContainerHandle,
        name: &str,
        skeleton_path: &str,
        base_pose_path: &str,
        tracking_level: SkeletalTrackingLevel,
        grip_limit_transforms: &[BoneTransform],
    ) -> Result<InputComponentHandle, InputError>;

    fn update_skeleton_component(
        &self,
        component: InputComponentHandle,
        motion_range: SkeletalMotionRange,
        transforms: &[BoneTransform],
    ) -> Result<(), InputError>;
}

/// IVRProperties, through the typed setters of CVRPropertyHelpers.
pub trait Properties: Send + Sync {
    fn tracked_device_to_property_container(
        &self,
        device_id: TrackedDeviceIndex,
    ) -> PropertyContainerHandle;

    fn set_string_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        value: &str,
    ) -> Result<(), PropertyError>;

    fn set_i32_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        value: i32,
    ) -> Result<(), PropertyError>;
}

/// IVRDriverLog
pub trait DriverLog: Send + Sync {
    fn log(&self, message: &str);
}

/// The host services handed to a provider at Init.
#[derive(Clone)]
pub struct DriverContext {
    pub host: Arc<dyn ServerDriverHost>,
    pub input: Arc<dyn DriverInput>,
    pub properties: Arc<dyn Properties>,
    pub log: Arc<dyn DriverLog>,
}

/// ITrackedDeviceServerDriver. Calls can arrive from any host thread.
pub trait TrackedDeviceServerDriver: Send + Sync {
    fn activate(&self, object_id: TrackedDeviceIndex) -> InitError;

    fn deactivate(&self);

    fn enter_standby(&self) {}

    /// Extended interfaces such as IVRDisplayComponent. None means not supported.
    fn get_component(&self, _name_and_version: &str) -> Option<NonNull<c_void>> {
        None
    }

    fn debug_request(&self, _request: &str, _response: &mut [u8]) {}

    fn get_pose(&self) -> DriverPose;
}

/// IServerTrackedDeviceProvider
pub trait ServerTrackedDeviceProvider: Send + Sync {
    fn init(&self, context: DriverContext) -> InitError;

    fn cleanup(&self) {}

    fn run_frame(&self) {}

    fn should_block_standby_mode(&self) -> bool {
        false
    }

    fn enter_standby(&self) {}

    fn leave_standby(&self) {}
}
