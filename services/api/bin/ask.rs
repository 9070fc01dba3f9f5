//! Ad-hoc smoke test: sends one prompt to Vertex AI and prints the reply.
//!
//! Uses the same environment as the service (`PROJECT_ID`, `LOCATION`,
//! `MODEL_NAME`) and Application Default Credentials.

use clap::Parser;
use std::{process::ExitCode, sync::Arc};
use webeye_core::{Assistant, config::BackendConfig, vertex::VertexModelFactory};

#[derive(Parser, Debug)]
#[command(version, about = "Ask the WebEye assistant a single question")]
struct Args {
    /// The question to send.
    #[arg(default_value = "你是谁？")]
    prompt: String,
    /// Persona to answer as: default or classifier.
    #[arg(short, long, default_value = "default")]
    role: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = BackendConfig::from_env();
    println!(
        "Project: {}, location: {}, model: {}",
        config.project_id, config.location, config.model_name
    );

    let assistant = Assistant::new(Arc::new(VertexModelFactory::new()));
    match assistant.generate_for_role(&args.prompt, &args.role).await {
        Ok(reply) => {
            println!("AI 回复: {}", reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("捕获到错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
