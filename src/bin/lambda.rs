//! Book registry -- AWS Lambda entrypoint.
//!
//! Configuration comes from the function environment only
//! (BOOKS_TABLE_NAME, LOG_BUCKET_NAME, PROJECT_MAJOR_VERSION). API Gateway
//! proxy events are translated to HTTP requests and served by the same
//! router as the standalone server.

use lambda_http::{run, Error};

use book_registry::{config, server, startup};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = config::load_config(None::<&str>)?;
    startup::init_tracing(&config.logging)?;
    startup::init_metrics(&config)?;

    let state = startup::build_state(config).await?;
    run(server::app(state)).await
}
