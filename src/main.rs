use lambda_http::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resume_parser::config::{Config, Runtime};
use resume_parser::handlers::create_router;
use resume_parser::AppState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let on_lambda = std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok();
    init_tracing(on_lambda);

    let config = Config::from_env()?;
    let runtime = config.runtime;
    let addr = format!("{}:{}", config.server_host, config.server_port);

    tracing::info!("Starting resume parser");
    tracing::info!("Parsing service endpoint: {}", config.parser_endpoint);
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);

    let state = AppState::from_config(config).await?;
    let app = create_router(state);

    match runtime {
        Runtime::Lambda => {
            tracing::info!("Running under the Lambda runtime");
            lambda_http::run(app).await
        }
        Runtime::Server => {
            tracing::info!("Server listening on {}", addr);
            let listener = TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

/// JSON lines under Lambda so CloudWatch can index fields; plain text locally.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "resume_parser=debug,tower_http=debug,axum::rejection=trace".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .without_time(),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}
