// Host interfaces are C++ objects owned by vrserver. Only the vtable prefix up to the last method
// this driver calls is described; unused methods keep their slot as an untyped entry.

use crate::{bridge::TrackedDeviceObject, driver::*, interfaces::*, types::*};
use log::warn;
use parking_lot::Mutex;
use std::{
    ffi::{c_char, c_void, CStr, CString},
    ptr::NonNull,
    sync::Arc,
};

type Slot = Option<unsafe extern "C" fn()>;

#[repr(C)]
pub struct CppInterface<V> {
    pub vtable: *const V,
}

struct HostInterface<V> {
    object: NonNull<CppInterface<V>>,
}

// Host interfaces are documented as callable from any driver thread
unsafe impl<V> Send for HostInterface<V> {}
unsafe impl<V> Sync for HostInterface<V> {}

impl<V> HostInterface<V> {
    fn vtable(&self) -> &V {
        unsafe { &*self.object.as_ref().vtable }
    }

    fn this(&self) -> *mut c_void {
        self.object.as_ptr().cast()
    }
}

fn to_c_string(value: &str) -> CString {
    CString::new(value.replace('\0', "")).unwrap_or_default()
}

/// IVRDriverContext
#[repr(C)]
pub struct DriverContextVtable {
    pub get_generic_interface:
        unsafe extern "C" fn(*mut c_void, *const c_char, *mut InitError) -> *mut c_void,
    pub get_driver_handle: unsafe extern "C" fn(*mut c_void) -> u64,
}

/// IVRServerDriverHost_006
#[repr(C)]
pub struct ServerDriverHostVtable {
    pub tracked_device_added:
        unsafe extern "C" fn(*mut c_void, *const c_char, DeviceClass, *mut c_void) -> bool,
    pub tracked_device_pose_updated:
        unsafe extern "C" fn(*mut c_void, TrackedDeviceIndex, *const DriverPose, u32),
    pub vsync_event: Slot,
    pub vendor_specific_event: Slot,
    pub is_exiting: Slot,
    pub poll_next_event: Slot,
    pub get_raw_tracked_device_poses:
        unsafe extern "C" fn(*mut c_void, f32, *mut TrackedDevicePose, u32),
}

/// IVRDriverInput_003
#[repr(C)]
pub struct DriverInputVtable {
    pub create_boolean_component: Slot,
    pub update_boolean_component: Slot,
    pub create_scalar_component: Slot,
    pub update_scalar_component: Slot,
    pub create_haptic_component: Slot,
    pub create_skeleton_component: unsafe extern "C" fn(
        *mut c_void,
        PropertyContainerHandle,
        *const c_char,
        *const c_char,
        *const c_char,
        SkeletalTrackingLevel,
        *const BoneTransform,
        u32,
        *mut InputComponentHandle,
    ) -> InputError,
    pub update_skeleton_component: unsafe extern "C" fn(
        *mut c_void,
        InputComponentHandle,
        SkeletalMotionRange,
        *const BoneTransform,
        u32,
    ) -> InputError,
}

/// IVRProperties_001
#[repr(C)]
pub struct PropertiesVtable {
    pub read_property_batch: Slot,
    pub write_property_batch: unsafe extern "C" fn(
        *mut c_void,
        PropertyContainerHandle,
        *mut PropertyWrite,
        u32,
    ) -> PropertyError,
    pub get_prop_error_name_from_enum: Slot,
    pub tracked_device_to_property_container:
        unsafe extern "C" fn(*mut c_void, TrackedDeviceIndex) -> PropertyContainerHandle,
}

/// IVRDriverLog_001
#[repr(C)]
pub struct DriverLogVtable {
    pub log: unsafe extern "C" fn(*mut c_void, *const c_char),
}

struct CppServerDriverHost {
    interface: HostInterface<ServerDriverHostVtable>,
    // The host keeps the device pointers it was given until the driver is unloaded
    announced_devices: Mutex<Vec<Box<TrackedDeviceObject>>>,
}

impl ServerDriverHost for CppServerDriverHost {
    fn tracked_device_added(
        &self,
        serial_number: &str,
        device_class: DeviceClass,
        driver: Arc<dyn TrackedDeviceServerDriver>,
    ) -> bool {
        let serial_number = to_c_string(serial_number);
        let object = TrackedDeviceObject::new(driver);

        let added = unsafe {
            (self.interface.vtable().tracked_device_added)(
                self.interface.this(),
                serial_number.as_ptr(),
                device_class,
                object.as_ptr(),
            )
        };

        self.announced_devices.lock().push(object);

        added
    }

    fn tracked_device_pose_updated(&self, device_id: TrackedDeviceIndex, pose: &DriverPose) {
        unsafe {
            (self.interface.vtable().tracked_device_pose_updated)(
                self.interface.this(),
                device_id,
                pose,
                std::mem::size_of::<DriverPose>() as u32,
            )
        }
    }

    fn get_raw_tracked_device_poses(
        &self,
        predicted_seconds_from_now: f32,
        poses: &mut [TrackedDevicePose],
    ) {
        unsafe {
            (self.interface.vtable().get_raw_tracked_device_poses)(
                self.interface.this(),
                predicted_seconds_from_now,
                poses.as_mut_ptr(),
                poses.len() as u32,
            )
        }
    }
}

struct CppDriverInput(HostInterface<DriverInputVtable>);

impl DriverInput for CppDriverInput {
    fn create_skeleton_component(
        &self,
        container: PropertyContainerHandle,
        name: &str,
        skeleton_path: &str,
        base_pose_path: &str,
        tracking_level: SkeletalTrackingLevel,
        grip_limit_transforms: &[BoneTransform],
    ) -> Result<InputComponentHandle, InputError> {
        let name = to_c_string(name);
        let skeleton_path = to_c_string(skeleton_path);
        let base_pose_path = to_c_string(base_pose_path);
        let mut handle = InputComponentHandle::INVALID;

        unsafe {
            (self.0.vtable().create_skeleton_component)(
                self.0.this(),
                container,
                name.as_ptr(),
                skeleton_path.as_ptr(),
                base_pose_path.as_ptr(),
                tracking_level,
                grip_limit_transforms.as_ptr(),
                grip_limit_transforms.len() as u32,
                &mut handle,
            )
        }
        .into_result()?;

        Ok(handle)
    }

    fn update_skeleton_component(
        &self,
        component: InputComponentHandle,
        motion_range: SkeletalMotionRange,
        transforms: &[BoneTransform],
    ) -> Result<(), InputError> {
        unsafe {
            (self.0.vtable().update_skeleton_component)(
                self.0.this(),
                component,
                motion_range,
                transforms.as_ptr(),
                transforms.len() as u32,
            )
        }
        .into_result()
    }
}

struct CppProperties(HostInterface<PropertiesVtable>);

impl CppProperties {
    // Same single-entry batch CVRPropertyHelpers builds for its typed setters
    fn write_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        buffer: *mut c_void,
        buffer_size: u32,
        tag: PropertyTypeTag,
    ) -> Result<(), PropertyError> {
        let mut batch = PropertyWrite {
            prop,
            write_type: PropertyWriteType::Set,
            set_error: PropertyError::SUCCESS,
            buffer,
            buffer_size,
            tag,
            error: PropertyError::SUCCESS,
        };

        unsafe { (self.0.vtable().write_property_batch)(self.0.this(), container, &mut batch, 1) }
            .into_result()?;

        batch.error.into_result()
    }
}

impl Properties for CppProperties {
    fn tracked_device_to_property_container(
        &self,
        device_id: TrackedDeviceIndex,
    ) -> PropertyContainerHandle {
        unsafe { (self.0.vtable().tracked_device_to_property_container)(self.0.this(), device_id) }
    }

    fn set_string_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        value: &str,
    ) -> Result<(), PropertyError> {
        let value = to_c_string(value);

        self.write_property(
            container,
            prop,
            value.as_ptr() as *mut c_void,
            value.as_bytes_with_nul().len() as u32,
            STRING_PROPERTY_TAG,
        )
    }

    fn set_i32_property(
        &self,
        container: PropertyContainerHandle,
        prop: DeviceProperty,
        mut value: i32,
    ) -> Result<(), PropertyError> {
        self.write_property(
            container,
            prop,
            &mut value as *mut i32 as *mut c_void,
            std::mem::size_of::<i32>() as u32,
            INT32_PROPERTY_TAG,
        )
    }
}

struct CppDriverLog(HostInterface<DriverLogVtable>);

impl DriverLog for CppDriverLog {
    fn log(&self, message: &str) {
        let message = to_c_string(message);

        unsafe { (self.0.vtable().log)(self.0.this(), message.as_ptr()) }
    }
}

unsafe fn generic_interface<V>(
    context: NonNull<CppInterface<DriverContextVtable>>,
    version: &CStr,
) -> Result<HostInterface<V>, InitError> {
    let mut error = InitError::NONE;
    let object = ((*context.as_ref().vtable).get_generic_interface)(
        context.as_ptr().cast(),
        version.as_ptr(),
        &mut error,
    );

    match NonNull::new(object.cast::<CppInterface<V>>()) {
        Some(object) if error.is_ok() => Ok(HostInterface { object }),
        _ => {
            warn!("Host does not provide {}: {error}", version.to_string_lossy());

            Err(if error.is_ok() {
                InitError::INIT_INTERFACE_NOT_FOUND
            } else {
                error
            })
        }
    }
}

impl DriverContext {
    /// Resolves every host interface the driver uses from an `IVRDriverContext *`, the way
    /// VR_INIT_SERVER_DRIVER_CONTEXT does.
    ///
    /// # Safety
    /// `context` must be null or point to a live IVRDriverContext whose interfaces outlive the
    /// returned value.
    pub unsafe fn from_cpp(context: *mut c_void) -> Result<Self, InitError> {
        let context = NonNull::new(context.cast::<CppInterface<DriverContextVtable>>())
            .ok_or(InitError::INIT_INTERFACE_NOT_FOUND)?;

        Ok(Self {
            host: Arc::new(CppServerDriverHost {
                interface: generic_interface(context, SERVER_DRIVER_HOST_VERSION)?,
                announced_devices: Mutex::new(vec![]),
            }),
            input: Arc::new(CppDriverInput(generic_interface(
                context,
                DRIVER_INPUT_VERSION,
            )?)),
            properties: Arc::new(CppProperties(generic_interface(context, PROPERTIES_VERSION)?)),
            log: Arc::new(CppDriverLog(generic_interface(context, DRIVER_LOG_VERSION)?)),
        })
    }
}
