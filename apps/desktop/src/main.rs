#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_desktop_lib::run().await
}
