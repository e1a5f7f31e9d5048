use anyhow::Result;

use fidelius::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    let code = CliApp::run().await?;
    std::process::exit(code);
}
