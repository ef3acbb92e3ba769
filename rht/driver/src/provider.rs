use crate::{device::RightHandController, logging_backend, settings::DriverSettings};
use log::{info, warn};
use parking_lot::Mutex;
use rht_openvr::{DeviceClass, DriverContext, InitError, ServerTrackedDeviceProvider};
use std::sync::Arc;

/// Announces the one right hand controller this driver exposes.
pub struct DeviceProvider {
    settings: DriverSettings,
    device: Mutex<Option<Arc<RightHandController>>>,
}

impl DeviceProvider {
    pub fn new(settings: DriverSettings) -> Self {
        Self {
            settings,
            device: Mutex::new(None),
        }
    }

    pub fn device(&self) -> Option<Arc<RightHandController>> {
        self.device.lock().clone()
    }
}

impl ServerTrackedDeviceProvider for DeviceProvider {
    fn init(&self, context: DriverContext) -> InitError {
        logging_backend::attach_host_log(Arc::clone(&context.log));

        let device = Arc::new(RightHandController::new(
            context.clone(),
            self.settings.clone(),
        ));
        let serial_number = device.serial_number().to_owned();

        if context
            .host
            .tracked_device_added(&serial_number, DeviceClass::Controller, device.clone())
        {
            info!("Announced {serial_number}");
        } else {
            warn!("SteamVR rejected {serial_number}");
        }

        *self.device.lock() = Some(device);

        InitError::NONE
    }

    fn cleanup(&self) {
        logging_backend::detach_host_log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_host::MockHost;
    use rht_openvr::TrackedDeviceServerDriver;

    // The host log sink is process wide
    static HOST_LOG_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn init_announces_one_controller() {
        let _lock = HOST_LOG_LOCK.lock();
        let host = MockHost::new();
        let provider = DeviceProvider::new(DriverSettings::default());

        assert!(provider.device().is_none());
        assert_eq!(provider.init(host.context()), InitError::NONE);

        assert_eq!(
            host.announced_serials(),
            [("right_hand_testSN0".to_owned(), DeviceClass::Controller)]
        );

        let announced = host.announced_driver(0).unwrap();
        let device = provider.device().unwrap();
        assert_eq!(
            Arc::as_ptr(&announced) as *const u8,
            Arc::as_ptr(&device) as *const u8
        );

        provider.cleanup();
    }

    #[test]
    fn rejected_announcement_still_succeeds() {
        let _lock = HOST_LOG_LOCK.lock();
        let host = MockHost::new();
        *host.reject_devices.lock() = true;
        let provider = DeviceProvider::new(DriverSettings::default());

        assert_eq!(provider.init(host.context()), InitError::NONE);
        assert!(host.announced_serials().is_empty());
        assert!(provider.device().is_some());

        provider.cleanup();
    }

    #[test]
    fn provider_has_no_frame_or_standby_work() {
        let provider = DeviceProvider::new(DriverSettings::default());

        provider.run_frame();
        provider.enter_standby();
        provider.leave_standby();
        assert!(!provider.should_block_standby_mode());
    }

    #[test]
    fn logs_reach_the_host_until_cleanup() {
        let _lock = HOST_LOG_LOCK.lock();
        logging_backend::init_logging();

        let host = MockHost::new();
        let provider = DeviceProvider::new(DriverSettings::default());
        provider.init(host.context());

        let device = provider.device().unwrap();
        assert!(device.get_component("IVRFoo_001").is_none());

        let lines = host.log_lines();
        assert!(lines
            .iter()
            .any(|line| line.contains("Announced right_hand_testSN0")));
        assert!(lines
            .iter()
            .any(|line| line.contains("GetComponent called for IVRFoo_001")));

        provider.cleanup();
        let logged = host.log_lines().len();
        device.get_component("IVRBar_001");
        assert_eq!(host.log_lines().len(), logged);
    }
}
