use crate::VRTrackingOrigin;

/// Tunables for a VR session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde-serialization", serde(default))]
pub struct VRSettings {
    // Clip planes passed to the runtime when computing eye projections
    pub near_z: f32,
    pub far_z: f32,

    // Movement added per unit of left controller axis deflection
    pub side_move_speed: f32,
    pub forward_move_speed: f32,

    // Axis deflections at or below this length never produce a direction key
    pub key_input_axis_deadzone: f32,

    pub tracking_origin: VRTrackingOrigin,

    // Used when the runtime can't report time since the last vsync
    pub fallback_seconds_to_photons: f32,

    // Used when the HMD doesn't report its refresh rate
    pub fallback_display_frequency: f32,
}

impl Default for VRSettings {
    fn default() -> VRSettings {
        VRSettings {
            near_z: 4.0,
            far_z: 16384.0,
            side_move_speed: 200.0,
            forward_move_speed: 200.0,
            key_input_axis_deadzone: 0.3,
            tracking_origin: VRTrackingOrigin::Standing,
            fallback_seconds_to_photons: 0.04,
            fallback_display_frequency: 90.0,
        }
    }
}

#[cfg(feature = "serde-serialization")]
impl VRSettings {
    /// Parses settings from TOML. Missing keys keep their default value.
    pub fn from_toml_str(source: &str) -> Result<VRSettings, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(all(test, feature = "serde-serialization"))]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = VRSettings::from_toml_str("far_z = 4096.0\ntracking_origin = \"Seated\"\n").unwrap();
        assert_eq!(settings.far_z, 4096.0);
        assert_eq!(settings.tracking_origin, VRTrackingOrigin::Seated);
        assert_eq!(settings.near_z, 4.0);
        assert_eq!(settings.key_input_axis_deadzone, 0.3);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(VRSettings::from_toml_str("").unwrap(), VRSettings::default());
    }
}
