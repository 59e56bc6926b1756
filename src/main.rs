//! emsclock main entrypoint.

use emsclock::run;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!();
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
