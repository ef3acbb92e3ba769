// Rust driver objects exposed to the host as C++ objects. The host only ever sees a pointer to
// the first field, the vtable pointer, and calls through it with `this` as first argument.

use crate::{driver::*, interfaces::*, types::*};
use log::info;
use std::{
    ffi::{c_char, c_void, CStr},
    ptr, slice,
    sync::Arc,
};

// Member functions returning a large struct by value use a hidden out pointer. Itanium passes it
// before `this`, which is what a plain C function returning the struct does too. MSVC passes it
// after `this` and returns it.
#[cfg(not(windows))]
pub type GetPoseFn = unsafe extern "C" fn(*mut TrackedDeviceObject) -> DriverPose;
#[cfg(windows)]
pub type GetPoseFn =
    unsafe extern "C" fn(*mut TrackedDeviceObject, *mut DriverPose) -> *mut DriverPose;

/// ITrackedDeviceServerDriver_005
#[repr(C)]
pub struct TrackedDeviceVtable {
    pub activate: unsafe extern "C" fn(*mut TrackedDeviceObject, TrackedDeviceIndex) -> InitError,
    pub deactivate: unsafe extern "C" fn(*mut TrackedDeviceObject),
    pub enter_standby: unsafe extern "C" fn(*mut TrackedDeviceObject),
    pub get_component: unsafe extern "C" fn(*mut TrackedDeviceObject, *const c_char) -> *mut c_void,
    pub debug_request: unsafe extern "C" fn(*mut TrackedDeviceObject, *const c_char, *mut c_char, u32),
    pub get_pose: GetPoseFn,
}

#[repr(C)]
pub struct TrackedDeviceObject {
    vtable: &'static TrackedDeviceVtable,
    driver: Arc<dyn TrackedDeviceServerDriver>,
}

unsafe fn string_arg<'a>(ptr: *const c_char) -> std::borrow::Cow<'a, str> {
    if ptr.is_null() {
        "".into()
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}

unsafe extern "C" fn device_activate(
    this: *mut TrackedDeviceObject,
    object_id: TrackedDeviceIndex,
) -> InitError {
    (*this).driver.activate(object_id)
}

unsafe extern "C" fn device_deactivate(this: *mut TrackedDeviceObject) {
    (*this).driver.deactivate()
}

unsafe extern "C" fn device_enter_standby(this: *mut TrackedDeviceObject) {
    (*this).driver.enter_standby()
}

unsafe extern "C" fn device_get_component(
    this: *mut TrackedDeviceObject,
    name_and_version: *const c_char,
) -> *mut c_void {
    (*this)
        .driver
        .get_component(&string_arg(name_and_version))
        .map_or(ptr::null_mut(), |component| component.as_ptr())
}

unsafe extern "C" fn device_debug_request(
    this: *mut TrackedDeviceObject,
    request: *const c_char,
    response_buffer: *mut c_char,
    response_buffer_size: u32,
) {
    let response: &mut [u8] = if response_buffer.is_null() || response_buffer_size == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(response_buffer.cast(), response_buffer_size as usize)
    };

    (*this).driver.debug_request(&string_arg(request), response)
}

#[cfg(not(windows))]
unsafe extern "C" fn device_get_pose(this: *mut TrackedDeviceObject) -> DriverPose {
    (*this).driver.get_pose()
}

#[cfg(windows)]
unsafe extern "C" fn device_get_pose(
    this: *mut TrackedDeviceObject,
    out: *mut DriverPose,
) -> *mut DriverPose {
    out.write((*this).driver.get_pose());
    out
}

static TRACKED_DEVICE_VTABLE: TrackedDeviceVtable = TrackedDeviceVtable {
    activate: device_activate,
    deactivate: device_deactivate,
    enter_standby: device_enter_standby,
    get_component: device_get_component,
    debug_request: device_debug_request,
    get_pose: device_get_pose,
};

impl TrackedDeviceObject {
    pub fn new(driver: Arc<dyn TrackedDeviceServerDriver>) -> Box<Self> {
        Box::new(Self {
            vtable: &TRACKED_DEVICE_VTABLE,
            driver,
        })
    }

    /// The `ITrackedDeviceServerDriver *` to hand to the host. Valid while `self` is alive.
    pub fn as_ptr(&self) -> *mut c_void {
        self as *const Self as *mut c_void
    }
}

/// IServerTrackedDeviceProvider_004
#[repr(C)]
pub struct DeviceProviderVtable {
    pub init: unsafe extern "C" fn(*mut DeviceProviderObject, *mut c_void) -> InitError,
    pub cleanup: unsafe extern "C" fn(*mut DeviceProviderObject),
    pub get_interface_versions: unsafe extern "C" fn(*mut DeviceProviderObject) -> *const *const c_char,
    pub run_frame: unsafe extern "C" fn(*mut DeviceProviderObject),
    pub should_block_standby_mode: unsafe extern "C" fn(*mut DeviceProviderObject) -> bool,
    pub enter_standby: unsafe extern "C" fn(*mut DeviceProviderObject),
    pub leave_standby: unsafe extern "C" fn(*mut DeviceProviderObject),
}

#[repr(C)]
pub struct DeviceProviderObject {
    vtable: &'static DeviceProviderVtable,
    provider: Box<dyn ServerTrackedDeviceProvider>,
}

unsafe extern "C" fn provider_init(
    this: *mut DeviceProviderObject,
    driver_context: *mut c_void,
) -> InitError {
    match DriverContext::from_cpp(driver_context) {
        Ok(context) => (*this).provider.init(context),
        Err(e) => e,
    }
}

unsafe extern "C" fn provider_cleanup(this: *mut DeviceProviderObject) {
    (*this).provider.cleanup()
}

unsafe extern "C" fn provider_get_interface_versions(
    _: *mut DeviceProviderObject,
) -> *const *const c_char {
    INTERFACE_VERSION_TABLE.as_ptr()
}

unsafe extern "C" fn provider_run_frame(this: *mut DeviceProviderObject) {
    (*this).provider.run_frame()
}

unsafe extern "C" fn provider_should_block_standby_mode(this: *mut DeviceProviderObject) -> bool {
    (*this).provider.should_block_standby_mode()
}

unsafe extern "C" fn provider_enter_standby(this: *mut DeviceProviderObject) {
    (*this).provider.enter_standby()
}

unsafe extern "C" fn provider_leave_standby(this: *mut DeviceProviderObject) {
    (*this).provider.leave_standby()
}

static DEVICE_PROVIDER_VTABLE: DeviceProviderVtable = DeviceProviderVtable {
    init: provider_init,
    cleanup: provider_cleanup,
    get_interface_versions: provider_get_interface_versions,
    run_frame: provider_run_frame,
    should_block_standby_mode: provider_should_block_standby_mode,
    enter_standby: provider_enter_standby,
    leave_standby: provider_leave_standby,
};

impl DeviceProviderObject {
    pub fn new(provider: impl ServerTrackedDeviceProvider + 'static) -> Self {
        Self {
            vtable: &DEVICE_PROVIDER_VTABLE,
            provider: Box::new(provider),
        }
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self as *const Self as *mut c_void
    }
}

/// Body of `HmdDriverFactory`. `get_provider` runs only when the host asks for the provider
/// interface, and must return the same object on every call.
///
/// # Safety
/// `interface_name` must be null or a valid C string, `return_code` null or writable.
pub unsafe fn driver_factory(
    interface_name: *const c_char,
    return_code: *mut i32,
    get_provider: impl FnOnce() -> &'static DeviceProviderObject,
) -> *mut c_void {
    let requested = if interface_name.is_null() {
        None
    } else {
        Some(CStr::from_ptr(interface_name))
    };

    let (object, code) = if requested == Some(SERVER_TRACKED_DEVICE_PROVIDER_VERSION) {
        (get_provider().as_ptr(), InitError::NONE)
    } else {
        info!(
            "HmdDriverFactory called for {}",
            requested.map(CStr::to_string_lossy).unwrap_or_default()
        );

        (ptr::null_mut(), InitError::INIT_INTERFACE_NOT_FOUND)
    };

    if !return_code.is_null() {
        *return_code = code.0;
    }

    object
}
