pub mod drive;
pub mod reset;
pub mod status;

use axum::response::IntoResponse;

pub async fn root() -> impl IntoResponse {
    "Chassis controller is online!"
}
