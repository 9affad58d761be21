mod app;
mod entrypoints;

// === Entry point for desktop ===
#[tokio::main(flavor = "multi_thread")]
async fn main() -> std::process::ExitCode {
    entrypoints::run::native_main().await
}
