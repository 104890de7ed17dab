mod error;
mod server;
mod store;
mod task;

use clap::{Parser, Subcommand};
use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::server::AppState;
use crate::store::{next_id, JsonStore, TaskStore};
use crate::task::{validate_create, CreateTask, Task};

#[derive(Parser)]
#[command(name = "tb")]
#[command(about = "Task Board - Kanban task tracker with web UI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, global = true)]
    debug: bool,
    #[arg(long, global = true, default_value = "tasks.json")]
    data: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 5000)]
        port: u16,
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },
    Task { #[command(subcommand)] action: TaskCommands },
}

#[derive(Subcommand)]
enum TaskCommands {
    Add { content: String, #[arg(long)] status: Option<String> },
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.debug { env::set_var("RUST_LOG", "debug"); } else { env::set_var("RUST_LOG", "info"); }
    env_logger::init();
    let store = JsonStore::new(cli.data);

    match cli.command {
        Commands::Serve { host, port, static_dir } => {
            server::serve(&host, port, AppState::new(Box::new(store)), static_dir).await?;
        }
        Commands::Task { action } => match action {
            TaskCommands::Add { content, status } => {
                let new = validate_create(CreateTask { content: Some(content), status })?;
                let mut tasks = store.load_all();
                let task = Task { id: next_id(&tasks), content: new.content, status: new.status };
                tasks.push(task.clone());
                store.save_all(&tasks)?;
                println!("✅ Task [{}] registered.", task.id);
            }
            TaskCommands::List => {
                let tasks = store.load_all();
                println!("TASK BOARD BACKLOG:");
                for t in &tasks {
                    println!("- [{}] {} ({})", t.id, t.content, t.status.as_str());
                }
            }
        },
    }
    Ok(())
}
