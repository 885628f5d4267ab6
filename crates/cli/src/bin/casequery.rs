use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    casequery_cli::main_entry().await
}
