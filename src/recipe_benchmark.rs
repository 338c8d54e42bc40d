// src/recipe_benchmark.rs
// Load generator for a running api_server: times repeated GET /api/recipes calls.
use clap::Parser;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "recipe_benchmark", about = "Time sequential GET /api/recipes requests")]
struct Args {
    /// Base URL of a running api_server.
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,

    /// Requests per round.
    #[arg(long, default_value_t = 500)]
    iterations: u32,

    /// Number of timed rounds.
    #[arg(long, default_value_t = 5)]
    rounds: u32,

    /// Optional `tag` query parameter.
    #[arg(long)]
    tag: Option<String>,
}

async fn run_round(
    client: &reqwest::Client,
    url: &str,
    iterations: u32,
    tag: Option<&str>,
) -> anyhow::Result<(Duration, usize)> {
    let mut bytes = 0usize;
    let start = Instant::now();
    for _ in 0..iterations {
        let mut request = client.get(url);
        if let Some(tag) = tag {
            request = request.query(&[("tag", tag)]);
        }
        let response = request.send().await?.error_for_status()?;
        bytes += response.text().await?.len();
    }
    Ok((start.elapsed(), bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let iterations = args.iterations.max(1);
    let rounds = args.rounds.max(1);
    let url = format!("{}/api/recipes", args.base_url.trim_end_matches('/'));

    println!(
        "--- Recipe API Benchmark: {} rounds x {} GET {} ---",
        rounds, iterations, url
    );

    let client = reqwest::Client::new();

    // One untimed request so connection setup is not counted.
    client.get(&url).send().await?.error_for_status()?;

    let mut timings = Vec::with_capacity(rounds as usize);
    for round in 1..=rounds {
        let (elapsed, bytes) = run_round(&client, &url, iterations, args.tag.as_deref()).await?;
        println!(
            "Round {}: {} ms ({} bytes read)",
            round,
            elapsed.as_millis(),
            bytes
        );
        timings.push(elapsed);
    }

    let total: Duration = timings.iter().sum();
    let min = timings.iter().min().copied().unwrap_or_default();
    let max = timings.iter().max().copied().unwrap_or_default();
    let mean = total / rounds;
    let per_request_us = mean.as_micros() as f64 / iterations as f64;

    println!("\n--- Results ---");
    println!("Mean round time: {} ms", mean.as_millis());
    println!("Min / max round time: {} ms / {} ms", min.as_millis(), max.as_millis());
    println!("Average time per request: {:.2} µs (microseconds)", per_request_us);
    Ok(())
}
