#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = inventory_rust::run().await {
        eprintln!("inventory-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
