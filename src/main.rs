use chassis_motor_api::config::load_app_config;
use chassis_motor_api::{build_app, configure_logging, start_server};
use tracing::error;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    configure_logging();

    let app_config = load_app_config();

    let (_app_state, app) = match build_app(app_config.clone()) {
        Ok(built) => built,
        Err(e) => {
            error!("Failed to attach chassis hardware: {}", e);
            std::process::exit(1);
        }
    };

    start_server(app, app_config).await;
}
