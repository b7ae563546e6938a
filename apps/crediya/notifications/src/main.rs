//! Loan Notifications Function Entry Point

use core_config::tracing::install_color_eyre;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    crediya_notifications::run().await
}
