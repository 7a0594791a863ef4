use actix_web::{App, HttpServer, web};
use log::info;

use pow_ledger::api::{self, AppState};
use pow_ledger::config::NodeConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::init();
    let config = NodeConfig::from_env();

    info!(
        "Starting ledger node at http://{}:{} (difficulty={})",
        config.host, config.port, config.difficulty
    );

    let state = web::Data::new(AppState::new(config.difficulty));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
