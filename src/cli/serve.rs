use crate::{config::Config, error, info, server, warning};

use super::open_store;

/// Runs the web front end until interrupted.
pub async fn serve(config: Config, open_browser: bool) {
    let store = open_store(&config).await;
    let url = format!("http://{}/", config.server_address);
    let state = server::AppState::new(config, store.clone());

    info!("Serving on {}", url);
    if open_browser && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped. Err: {}", e);
    }
    store.close().await;
}
