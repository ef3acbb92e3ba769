use std::{
    ffi::{c_char, CStr},
    ptr,
};

// Driver-side interfaces
pub const TRACKED_DEVICE_SERVER_DRIVER_VERSION: &CStr = c"ITrackedDeviceServerDriver_005";
pub const SERVER_TRACKED_DEVICE_PROVIDER_VERSION: &CStr = c"IServerTrackedDeviceProvider_004";

// Host-side interfaces, looked up through IVRDriverContext::GetGenericInterface
pub const SERVER_DRIVER_HOST_VERSION: &CStr = c"IVRServerDriverHost_006";
pub const DRIVER_INPUT_VERSION: &CStr = c"IVRDriverInput_003";
pub const PROPERTIES_VERSION: &CStr = c"IVRProperties_001";
pub const DRIVER_LOG_VERSION: &CStr = c"IVRDriverLog_001";

/// The versions this driver was built against. The host refuses to load a driver that lists a
/// version it does not implement.
pub const INTERFACE_VERSIONS: [&CStr; 11] = [
    c"IVRSettings_003",
    TRACKED_DEVICE_SERVER_DRIVER_VERSION,
    c"IVRDisplayComponent_002",
    c"IVRDriverDirectModeComponent_006",
    c"IVRCameraComponent_003",
    SERVER_TRACKED_DEVICE_PROVIDER_VERSION,
    c"IVRWatchdogProvider_001",
    c"IVRVirtualDisplay_002",
    c"IVRDriverManager_001",
    c"IVRResources_001",
    c"IVRCompositorPluginProvider_001",
];

/// Null terminated `const char *const *`, the shape GetInterfaceVersions returns.
#[repr(transparent)]
pub struct InterfaceVersionTable([*const c_char; INTERFACE_VERSIONS.len() + 1]);

// The pointers reference 'static string literals and are never written through
unsafe impl Sync for InterfaceVersionTable {}

impl InterfaceVersionTable {
    pub fn as_ptr(&self) -> *const *const c_char {
        self.0.as_ptr()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.0
            .iter()
            .take_while(|ptr| !ptr.is_null())
            .map(|&ptr| unsafe { CStr::from_ptr(ptr) })
    }
}

pub static INTERFACE_VERSION_TABLE: InterfaceVersionTable = InterfaceVersionTable([
    INTERFACE_VERSIONS[0].as_ptr(),
    INTERFACE_VERSIONS[1].as_ptr(),
    INTERFACE_VERSIONS[2].as_ptr(),
    INTERFACE_VERSIONS[3].as_ptr(),
    INTERFACE_VERSIONS[4].as_ptr(),
    INTERFACE_VERSIONS[5].as_ptr(),
    INTERFACE_VERSIONS[6].as_ptr(),
    INTERFACE_VERSIONS[7].as_ptr(),
    INTERFACE_VERSIONS[8].as_ptr(),
    INTERFACE_VERSIONS[9].as_ptr(),
    INTERFACE_VERSIONS[10].as_ptr(),
    ptr::null(),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_table_is_null_terminated() {
        let listed = INTERFACE_VERSION_TABLE.iter().collect::<Vec<_>>();

        assert_eq!(listed, INTERFACE_VERSIONS);
        assert!(listed.contains(&SERVER_TRACKED_DEVICE_PROVIDER_VERSION));
        assert!(unsafe { *INTERFACE_VERSION_TABLE.as_ptr().add(INTERFACE_VERSIONS.len()) }
            .is_null());
    }
}
