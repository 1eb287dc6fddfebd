use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dayplan::tui::run().await
}
