use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DriverSettings {
    /// Every identity string of the device is derived from this name.
    pub device_name: String,
    pub manufacturer: String,
    pub update_interval_ms: u64,
    /// Position reported until the HMD has been seen, in meters from the tracking origin.
    pub default_position: DVec3,
    /// Added to the first valid HMD position to place the controller.
    pub hmd_offset: DVec3,
}

impl DriverSettings {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            device_name: "right_hand_test".into(),
            manufacturer: "sean".into(),
            update_interval_ms: 11,
            default_position: DVec3::new(0.0, -0.5, -1.5),
            hmd_offset: DVec3::new(0.0, 0.0, 0.75),
        }
    }
}
