//! `ZIPTAX_API_KEY=... cargo run --example get -- "200 Spectrum Center Dr, Irvine, CA 92618"`

use std::error::Error;
use std::process;

const DEFAULT_ADDRESS: &str = "200 Spectrum Center Dr, Irvine, CA 92618";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let api_key = match std::env::var("ZIPTAX_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("ZIPTAX_API_KEY is not set");
            process::exit(2);
        }
    };
    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let info = match ziptax::get(&address, &api_key).await {
        Ok(info) => info,
        Err(e) => {
            log::error!("lookup failed (retryable: {})", e.retryable());
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {}", cause));
                source = cause.source();
            }
            eprintln!("Error fetching sales tax: {}", message);
            process::exit(1);
        }
    };

    println!("{}", info);
}
