use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    blogwriter::cli::run().await
}
