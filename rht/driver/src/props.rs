use log::warn;
use rht_openvr::{
    ControllerRole, DeviceClass, DeviceProperty, Properties, PropertyContainerHandle,
    PropertyError,
};

/// The strings the host shows for the device, all derived from the device name.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub controller_type: String,
    pub model_number: String,
    pub serial_number: String,
    pub render_model: String,
    pub input_profile_path: String,
    pub legacy_input_profile: String,
}

impl DeviceIdentity {
    pub fn new(device_name: &str, manufacturer: &str) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            controller_type: device_name.into(),
            model_number: format!("{device_name}1"),
            serial_number: format!("{device_name}SN0"),
            render_model: format!("{{{device_name}}}/rendermodels/{device_name}"),
            input_profile_path: format!("{{{device_name}}}/input/{device_name}_profile.json"),
            legacy_input_profile: device_name.into(),
        }
    }
}

pub fn set_device_openvr_props(
    properties: &dyn Properties,
    container: PropertyContainerHandle,
    identity: &DeviceIdentity,
) {
    use DeviceProperty::*;

    let report = |prop: DeviceProperty, res: Result<(), PropertyError>| {
        if let Err(e) = res {
            warn!("Failed to set property {prop:?}: {e}");
        }
    };
    let set_prop = |prop, value: &str| {
        report(prop, properties.set_string_property(container, prop, value))
    };
    let set_int_prop = |prop, value: i32| {
        report(prop, properties.set_i32_property(container, prop, value))
    };

    set_prop(SerialNumberString, &identity.serial_number);
    set_prop(ModelNumberString, &identity.model_number);
    set_prop(RenderModelNameString, &identity.render_model);
    set_prop(ManufacturerNameString, &identity.manufacturer);
    set_int_prop(ControllerRoleHintInt32, ControllerRole::RightHand as i32);
    set_int_prop(DeviceClassInt32, DeviceClass::Controller as i32);
    set_prop(InputProfilePathString, &identity.input_profile_path);
    set_prop(ControllerTypeString, &identity.controller_type);
    set_prop(LegacyInputProfileString, &identity.legacy_input_profile);
}
