pub fn get_config_path() -> String {
    "/etc/chassis-motor-api/config.yaml".to_string() // todo: make this configurable
}
