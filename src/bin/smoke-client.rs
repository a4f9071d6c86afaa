//! Call every endpoint of a running game tips server once and print the answers.

use clap::Parser;
use reqwest::{Client, Method};
use serde_json::{Value, json};

const EXPERIENCE_LEVEL_ID: i64 = 1;
const GAME_ID: &str = "64c3c941d54e7b39dc4b1d6d";
const TIP_ID: &str = "64c3cdfbd54e7b39dc4b1d74";

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Exercise every game tips endpoint against a running server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    host: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let host = cli.host.trim_end_matches('/');
    let client = Client::new();

    println!("#########################");
    println!("### TESTING ENDPOINTS ###");
    println!("#########################");
    println!();

    let report = json!({
        "tip_id": TIP_ID,
        "reason": "Incorrect Information",
        "description": "Test report",
    });

    let calls = [
        (Method::GET, format!("{host}/experience/{EXPERIENCE_LEVEL_ID}"), None),
        (Method::GET, format!("{host}/games"), None),
        (Method::GET, format!("{host}/games/{GAME_ID}"), None),
        (
            Method::GET,
            format!("{host}/tips?game_id={GAME_ID}&experience={EXPERIENCE_LEVEL_ID}"),
            None,
        ),
        (Method::GET, format!("{host}/tips/{TIP_ID}"), None),
        (Method::PATCH, format!("{host}/tips/{TIP_ID}/like"), None),
        (Method::GET, format!("{host}/reports?tip_id={TIP_ID}"), None),
        (Method::POST, format!("{host}/reports"), Some(report)),
    ];

    for (method, url, payload) in calls {
        println!("{method} {url}");
        match call(&client, method, &url, payload).await {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Error: {err}"),
        }
    }
}

/// Send one request and pretty-print its JSON answer.
async fn call(
    client: &Client,
    method: Method,
    url: &str,
    payload: Option<Value>,
) -> anyhow::Result<String> {
    let mut request = client.request(method, url);
    if let Some(payload) = payload {
        request = request.json(&payload);
    }

    let body: Value = request.send().await?.json().await?;
    Ok(serde_json::to_string_pretty(&body)?)
}
