#[tokio::main]
async fn main() {
    cloudflare_zone::cli::main().await
}
