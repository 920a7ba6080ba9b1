#[tokio::main]
async fn main() {
    if let Err(e) = appointment_booking::run().await {
        eprintln!("Fatal: {}", e);
        std::process::exit(1);
    }
}
