#[tokio::main]
async fn main() {
    if let Err(err) = cc_switch_web_lib::serve().await {
        eprintln!("cc-switch-web failed to start: {err}");
        std::process::exit(1);
    }
}
