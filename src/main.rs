use rusty_sos::prelude::run_app;

#[tokio::main]
async fn main() {
    run_app().await;
}
