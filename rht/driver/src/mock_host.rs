// Recording stand-in for SteamVR, used by the driver tests.

use glam::Vec3;
use parking_lot::Mutex;
use rht_openvr::*;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

pub const SKELETON_HANDLE: InputComponentHandle = InputComponentHandle(0x5e1e);

#[derive(Clone, Debug)]
pub enum HostCall {
    HmdQueried,
    PoseUpdated {
        device_id: TrackedDeviceIndex,
        pose: DriverPose,
    },
    SkeletonUpdated {
        component: InputComponentHandle,
        motion_range: SkeletalMotionRange,
        transforms: Vec<BoneTransform>,
    },
}

#[derive(Clone, Debug)]
pub struct SkeletonCreation {
    pub container: PropertyContainerHandle,
    pub name: String,
    pub skeleton_path: String,
    pub base_pose_path: String,
    pub tracking_level: SkeletalTrackingLevel,
    pub grip_limit_transforms: Vec<BoneTransform>,
}

pub struct Announcement {
    pub serial_number: String,
    pub device_class: DeviceClass,
    pub driver: Arc<dyn TrackedDeviceServerDriver>,
}

#[derive(Default)]
pub struct MockHost {
    pub reject_devices: Mutex<bool>,
    pub fail_skeleton: Mutex<bool>,
    hmd_position: Mutex<Option<Vec3>>,
    failing_properties: Mutex<HashSet<DeviceProperty>>,
    announcements: Mutex<Vec<Announcement>>,
    skeleton_creations: Mutex<Vec<SkeletonCreation>>,
    string_properties: Mutex<HashMap<(PropertyContainerHandle, DeviceProperty), String>>,
    i32_properties: Mutex<HashMap<(PropertyContainerHandle, DeviceProperty), i32>>,
    calls: Mutex<Vec<HostCall>>,
    log_lines: Mutex<Vec<String>>,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn context(self: &Arc<Self>) -> DriverContext {
        DriverContext {
            host: self.clone(),
            input: self.clone(),
            properties: self.clone(),
            log: self.clone(),
        }
    }

    /// None reports the HMD as not tracking.
    pub fn set_hmd_position(&self, position: Option<Vec3>) {
        *self.hmd_position.lock() = position;
    }

    pub fn fail_property(&self, prop: DeviceProperty) {
        self.failing_properties.lock().insert(prop);
    }

    pub fn string_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
    ) -> Option<String> {
        self.string_properties.lock().get(&(container, prop)).cloned()
    }

    pub fn i32_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
    ) -> Option<i32> {
        self.i32_properties.lock().get(&(container, prop)).copied()
    }

    pub fn announced_serials(&self) -> Vec<(String, DeviceClass)> {
        self.announcements
            .lock()
            .iter()
            .map(|a| (a.serial_number.clone(), a.device_class))
            .collect()
    }

    pub fn announced_driver(&self, index: usize) -> Option<Arc<dyn TrackedDeviceServerDriver>> {
        self.announcements
            .lock()
            .get(index)
            .map(|a| Arc::clone(&a.driver))
    }

    pub fn skeleton_creations(&self) -> Vec<SkeletonCreation> {
        self.skeleton_creations.lock().clone()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn pose_updates(&self) -> Vec<(TrackedDeviceIndex, DriverPose)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::PoseUpdated { device_id, pose } => Some((*device_id, *pose)),
                _ => None,
            })
            .collect()
    }

    pub fn skeleton_update_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, HostCall::SkeletonUpdated { .. }))
            .count()
    }

    pub fn hmd_query_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, HostCall::HmdQueried))
            .count()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.log_lines.lock().clone()
    }

    /// Polls `condition` until it holds or a generous deadline passes.
    pub fn wait_for(&self, condition: impl Fn(&Self) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition(self) {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }

        condition(self)
    }
}

impl ServerDriverHost for MockHost {
    fn tracked_device_added(
        &self,
        serial_number: &str,
        device_class: DeviceClass,
        driver: Arc<dyn TrackedDeviceServerDriver>,
    ) -> bool {
        if *self.reject_devices.lock() {
            return false;
        }

        self.announcements.lock().push(Announcement {
            serial_number: serial_number.into(),
            device_class,
            driver,
        });

        true
    }

    fn tracked_device_pose_updated(&self, device_id: TrackedDeviceIndex, pose: &DriverPose) {
        self.calls.lock().push(HostCall::PoseUpdated {
            device_id,
            pose: *pose,
        });
    }

    fn get_raw_tracked_device_poses(
        &self,
        _predicted_seconds_from_now: f32,
        poses: &mut [TrackedDevicePose],
    ) {
        self.calls.lock().push(HostCall::HmdQueried);

        let Some(hmd) = poses.first_mut() else {
            return;
        };

        *hmd = TrackedDevicePose::default();
        if let Some(position) = *self.hmd_position.lock() {
            hmd.device_to_absolute_tracking.m = [
                [1.0, 0.0, 0.0, position.x],
                [0.0, 1.0, 0.0, position.y],
                [0.0, 0.0, 1.0, position.z],
            ];
            hmd.tracking_result = TrackingResult::RUNNING_OK;
            hmd.pose_is_valid = true;
            hmd.device_is_connected = true;
        }
    }
}

impl DriverInput for MockHost {
    fn create_skeleton_component(
        &self,
        container: PropertyContainerHandle,
        name: &str,
        skeleton_path: &str,
        base_pose_path: &str,
        tracking_level: SkeletalTrackingLevel,
        grip_limit_transforms: &[BoneTransform],
    ) -> Result<InputComponentHandle, InputError> {
        if *self.fail_skeleton.lock() {
            return Err(InputError::INVALID_SKELETON);
        }

        self.skeleton_creations.lock().push(SkeletonCreation {
            container,
            name: name.into(),
            skeleton_path: skeleton_path.into(),
            base_pose_path: base_pose_path.into(),
            tracking_level,
            grip_limit_transforms: grip_limit_transforms.to_vec(),
        });

        Ok(SKELETON_HANDLE)
    }

    fn update_skeleton_component(
        &self,
        component: InputComponentHandle,
        motion_range: SkeletalMotionRange,
        transforms: &[BoneTransform],
    ) -> Result<(), InputError> {
        self.calls.lock().push(HostCall::SkeletonUpdated {
            component,
            motion_range,
            transforms: transforms.to_vec(),
        });

        if component == InputComponentHandle::INVALID {
            Err(InputError::INVALID_HANDLE)
        } else {
            Ok(())
        }
    }
}

impl Properties for MockHost {
    fn tracked_device_to_property_container(
        &self,
        device_id: TrackedDeviceIndex,
    ) -> PropertyContainerHandle {
        0x1000 + device_id as PropertyContainerHandle
    }

    fn set_string_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        value: &str,
    ) -> Result<(), PropertyError> {
        if self.failing_properties.lock().contains(&prop) {
            return Err(PropertyError::PERMISSION_DENIED);
        }
        self.string_properties
            .lock()
            .insert((container, prop), value.into());

        Ok(())
    }

    fn set_i32_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        value: i32,
    ) -> Result<(), PropertyError> {
        if self.failing_properties.lock().contains(&prop) {
            return Err(PropertyError::PERMISSION_DENIED);
        }
        self.i32_properties.lock().insert((container, prop), value);

        Ok(())
    }
}

impl DriverLog for MockHost {
    fn log(&self, message: &str) {
        self.log_lines.lock().push(message.into());
    }
}
