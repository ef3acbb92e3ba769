use crate::{
    bones::RIGHT_GRIP_LIMIT,
    gesture::HandGesture,
    props::{self, DeviceIdentity},
    settings::DriverSettings,
    thread_loop::{self, ThreadLoop},
};
use anyhow::{Context, Result};
use glam::DVec3;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rht_openvr::{
    DriverContext, DriverInput, DriverPose, HmdQuaternion, InitError, InputComponentHandle,
    PropertyContainerHandle, ServerDriverHost, SkeletalMotionRange, SkeletalTrackingLevel,
    TrackedDeviceIndex, TrackedDevicePose, TrackedDeviceServerDriver, TrackingResult,
    TRACKED_DEVICE_INDEX_HMD,
};
use std::{ffi::c_void, ptr::NonNull, sync::Arc, thread};

pub const SKELETON_COMPONENT_NAME: &str = "/input/skeleton/right";
pub const SKELETON_PATH: &str = "/skeleton/hand/right";
pub const SKELETON_BASE_POSE_PATH: &str = "/pose_raw";

pub fn initial_pose(position: DVec3) -> DriverPose {
    DriverPose {
        q_world_from_driver_rotation: HmdQuaternion::IDENTITY,
        q_driver_from_head_rotation: HmdQuaternion::IDENTITY,
        q_rotation: HmdQuaternion::IDENTITY,
        vec_position: position.to_array(),
        result: TrackingResult::RUNNING_OK,
        pose_is_valid: true,
        device_is_connected: true,
        ..Default::default()
    }
}

// State owned by the update thread
struct PoseUpdater {
    host: Arc<dyn ServerDriverHost>,
    input: Arc<dyn DriverInput>,
    object_id: TrackedDeviceIndex,
    skeleton: InputComponentHandle,
    pose: Arc<Mutex<DriverPose>>,
    hmd_offset: DVec3,
    frame: u64,
    hmd_found: bool,
}

impl PoseUpdater {
    fn tick(&mut self) {
        self.frame += 1;

        // The controller is placed once relative to where the headset first shows up
        if !self.hmd_found {
            let mut poses = [TrackedDevicePose::default(); 1];
            self.host.get_raw_tracked_device_poses(0.0, &mut poses);

            let hmd = &poses[TRACKED_DEVICE_INDEX_HMD as usize];
            if hmd.pose_is_valid {
                let position =
                    hmd.device_to_absolute_tracking.translation().as_dvec3() + self.hmd_offset;
                self.pose.lock().vec_position = position.to_array();
                self.hmd_found = true;

                info!("HMD found, controller placed at {position}");
            }
        }

        let pose = *self.pose.lock();
        self.host.tracked_device_pose_updated(self.object_id, &pose);

        let transforms = HandGesture::for_frame(self.frame).transforms();
        for motion_range in [
            SkeletalMotionRange::WithoutController,
            SkeletalMotionRange::WithController,
        ] {
            self.input
                .update_skeleton_component(self.skeleton, motion_range, transforms)
                .ok();
        }
    }
}

struct ActiveDevice {
    object_id: TrackedDeviceIndex,
    update_loop: ThreadLoop,
}

pub struct RightHandController {
    context: DriverContext,
    settings: DriverSettings,
    identity: DeviceIdentity,
    pose: Arc<Mutex<DriverPose>>,
    active: Mutex<Option<ActiveDevice>>,
}

impl RightHandController {
    pub fn new(context: DriverContext, settings: DriverSettings) -> Self {
        let identity = DeviceIdentity::new(&settings.device_name, &settings.manufacturer);
        let pose = Arc::new(Mutex::new(initial_pose(settings.default_position)));

        Self {
            context,
            settings,
            identity,
            pose,
            active: Mutex::new(None),
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.identity.serial_number
    }

    pub fn is_active(&self) -> bool {
        self.active.lock().is_some()
    }

    fn create_skeleton(&self, container: PropertyContainerHandle) -> Result<InputComponentHandle> {
        self.context
            .input
            .create_skeleton_component(
                container,
                SKELETON_COMPONENT_NAME,
                SKELETON_PATH,
                SKELETON_BASE_POSE_PATH,
                SkeletalTrackingLevel::Partial,
                &RIGHT_GRIP_LIMIT,
            )
            .context("Failed to create the hand skeleton component")
    }

    fn start(&self, object_id: TrackedDeviceIndex) -> Result<ActiveDevice> {
        *self.pose.lock() = initial_pose(self.settings.default_position);

        let container = self
            .context
            .properties
            .tracked_device_to_property_container(object_id);
        props::set_device_openvr_props(&*self.context.properties, container, &self.identity);

        let skeleton = self.create_skeleton(container).unwrap_or_else(|e| {
            warn!("{e:#}");
            InputComponentHandle::INVALID
        });

        debug!(
            "Activating with settings {}",
            serde_json::to_string(&self.settings).unwrap_or_default()
        );

        let mut updater = PoseUpdater {
            host: Arc::clone(&self.context.host),
            input: Arc::clone(&self.context.input),
            object_id,
            skeleton,
            pose: Arc::clone(&self.pose),
            hmd_offset: self.settings.hmd_offset,
            frame: 0,
            hmd_found: false,
        };
        let interval = self.settings.update_interval();

        let update_loop = thread_loop::spawn("right hand update", move || {
            updater.tick();
            thread::sleep(interval);
        })?;

        Ok(ActiveDevice {
            object_id,
            update_loop,
        })
    }
}

impl TrackedDeviceServerDriver for RightHandController {
    fn activate(&self, object_id: TrackedDeviceIndex) -> InitError {
        let mut active = self.active.lock();

        if let Some(previous) = active.take() {
            info!("Device {} activated again, restarting", previous.object_id);
            previous.update_loop.stop();
        }

        match self.start(object_id) {
            Ok(device) => {
                info!("Activated {} as device {object_id}", self.serial_number());
                *active = Some(device);

                InitError::NONE
            }
            Err(e) => {
                error!("Failed to activate {}: {e:#}", self.serial_number());

                InitError::DRIVER_FAILED
            }
        }
    }

    fn deactivate(&self) {
        let Some(device) = self.active.lock().take() else {
            return;
        };

        device.update_loop.stop();
        info!("Device {} deactivated", device.object_id);
    }

    fn get_component(&self, name_and_version: &str) -> Option<NonNull<c_void>> {
        info!("GetComponent called for {name_and_version}");

        None
    }

    fn get_pose(&self) -> DriverPose {
        *self.pose.lock()
    }
}
