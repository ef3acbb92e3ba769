mod bones;
mod device;
mod gesture;
mod logging_backend;
#[cfg(test)]
mod mock_host;
mod props;
mod provider;
mod settings;
mod thread_loop;

pub use bones::{HandSkeleton, HandSkeletonBone, BONE_COUNT};
pub use device::RightHandController;
pub use gesture::HandGesture;
pub use provider::DeviceProvider;
pub use settings::DriverSettings;

use once_cell::sync::OnceCell;
use rht_openvr::DeviceProviderObject;
use std::ffi::{c_char, c_void};

static DEVICE_PROVIDER: OnceCell<DeviceProviderObject> = OnceCell::new();

fn device_provider() -> &'static DeviceProviderObject {
    DEVICE_PROVIDER
        .get_or_init(|| DeviceProviderObject::new(DeviceProvider::new(DriverSettings::default())))
}

/// This is the SteamVR/OpenVR entry point
/// # Safety
/// `interface_name` must be null or a valid C string, `return_code` null or writable.
#[no_mangle]
pub unsafe extern "C" fn HmdDriverFactory(
    interface_name: *const c_char,
    return_code: *mut i32,
) -> *mut c_void {
    logging_backend::init_logging();

    rht_openvr::driver_factory(interface_name, return_code, device_provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rht_openvr::{InitError, SERVER_TRACKED_DEVICE_PROVIDER_VERSION};
    use std::ptr;

    #[test]
    fn factory_returns_the_same_provider() {
        let mut code = -1;

        unsafe {
            let first =
                HmdDriverFactory(SERVER_TRACKED_DEVICE_PROVIDER_VERSION.as_ptr(), &mut code);
            assert!(!first.is_null());
            assert_eq!(code, InitError::NONE.0);

            let second = HmdDriverFactory(
                SERVER_TRACKED_DEVICE_PROVIDER_VERSION.as_ptr(),
                ptr::null_mut(),
            );
            assert_eq!(first, second);
            assert_eq!(first, device_provider().as_ptr());
        }
    }

    #[test]
    fn factory_refuses_other_interfaces() {
        let mut code = -1;

        unsafe {
            let object = HmdDriverFactory(c"IVRWatchdogProvider_001".as_ptr(), &mut code);
            assert!(object.is_null());
            assert_eq!(code, InitError::INIT_INTERFACE_NOT_FOUND.0);

            assert!(HmdDriverFactory(c"".as_ptr(), ptr::null_mut()).is_null());
        }
    }
}
