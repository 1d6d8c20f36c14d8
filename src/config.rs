use crate::utils;

use tracing::debug;

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct ApiConfig {
    pub listen_address: String,
}

/// Hardware wiring: which backend drives the lines, which electrical
/// profile to select, and the four BCM pin numbers per motor group in
/// wiring order.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct MotorConfig {
    pub backend: String,
    pub pinctrl_profile: String,
    pub motor1_pins: [u8; 4],
    pub motor2_pins: [u8; 4],
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub motor: MotorConfig,
}

pub fn load_app_config_from_str(config_str: &str) -> AppConfig {
    serde_yaml::from_str(config_str).expect("Failed to parse app config")
}

pub fn load_app_config() -> AppConfig {
    let app_config_path = utils::filesystem::get_config_path();
    let config_str = std::fs::read_to_string(&app_config_path).expect(&format!(
        "Failed to read app config file at {}",
        app_config_path
    ));

    let app_config: AppConfig = load_app_config_from_str(&config_str);

    // Log the config struct as json
    debug!(
        "Parsed app config: {}",
        serde_json::to_string(&app_config).unwrap_or_default()
    );
    app_config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_app_config() {
        let config_str = r#"
        api:
            listen_address: "0.0.0.0:3500"

        motor:
            backend: "GpioChassis"
            pinctrl_profile: "default"
            motor1_pins: [17, 27, 22, 23]
            motor2_pins: [24, 25, 5, 6]
        "#;

        let config = load_app_config_from_str(config_str);

        assert_eq!(config.api.listen_address, "0.0.0.0:3500");
        assert_eq!(config.motor.backend, "GpioChassis");
        assert_eq!(config.motor.pinctrl_profile, "default");
        assert_eq!(config.motor.motor1_pins, [17, 27, 22, 23]);
        assert_eq!(config.motor.motor2_pins, [24, 25, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "Failed to parse app config")]
    fn test_missing_pin_group_is_fatal() {
        let config_str = r#"
        api:
            listen_address: "0.0.0.0:3500"

        motor:
            backend: "GpioChassis"
            pinctrl_profile: "default"
            motor1_pins: [17, 27, 22, 23]
        "#;

        load_app_config_from_str(config_str);
    }

    #[test]
    #[should_panic(expected = "Failed to parse app config")]
    fn test_wrong_pin_group_arity_is_fatal() {
        let config_str = r#"
        api:
            listen_address: "0.0.0.0:3500"

        motor:
            backend: "GpioChassis"
            pinctrl_profile: "default"
            motor1_pins: [17, 27, 22]
            motor2_pins: [24, 25, 5, 6]
        "#;

        load_app_config_from_str(config_str);
    }
}
