pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod state;

pub use config::Config;

use anyhow::Context;
use db::{NewAdmin, NewComment, NewImage, NewPost, Store};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "serve" | "-s" | "--serve" => run_server(config).await,

        "setup" => run_setup(config).await,

        "init" => cmd_init_config(),

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        other => {
            println!("Unknown command: {other}");
            println!();
            print_help();
            Ok(())
        }
    }
}

/// Connects to the existing store (no reinitialization) and runs the
/// web server until ctrl-c.
async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Inkpot v{} starting...", env!("CARGO_PKG_VERSION"));

    let state = api::create_app_state_from_config(config)
        .await
        .context("Failed to initialize application state")?;

    let addr = {
        let config = state.config().read().await;
        format!("{}:{}", config.server.host, config.server.port)
    };

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Web server running at http://{addr}");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {e}");
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {e}"),
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

/// Provisions a clean store and seeds it with demo content: one
/// admin, one post, one comment, one image.
async fn run_setup(config: Config) -> anyhow::Result<()> {
    println!("Setting up the blog database...");

    let store = Store::provision(&config.general.database_path)
        .await
        .context("Failed to provision database")?;

    let password_hash = db::hash_password("password")?;
    let admin = store
        .create_admin(NewAdmin {
            username: "admin".to_string(),
            password_hash,
            display_name: "Site Admin".to_string(),
        })
        .await?;
    println!("Created admin with ID: {}", admin.id);

    let post = store
        .create_post(NewPost {
            title: "My First Blog Post".to_string(),
            content: "This is the content of my first blog post. Welcome to my blog!"
                .to_string(),
        })
        .await?;
    println!("Created post with ID: {}", post.id);

    let comment = store
        .create_comment(NewComment {
            post_id: post.id,
            commenter_name: "John Doe".to_string(),
            content: "Great first post! Looking forward to more.".to_string(),
        })
        .await?;
    println!("Created comment with ID: {}", comment.id);

    let image = store
        .create_image(NewImage {
            post_id: post.id,
            filename: "example.jpg".to_string(),
            file_path: "/images/example.jpg".to_string(),
        })
        .await?;
    println!("Created image with ID: {}", image.id);

    let comments = store.list_comments_for_post(post.id).await?;

    println!();
    println!("Post: {}", post.title);
    println!("Content: {}", post.content);
    println!("Comments ({}):", comments.len());
    for c in &comments {
        println!("- {}: {}", c.commenter_name, c.content);
    }

    let images = store.list_images_for_post(post.id).await?;

    println!("Images ({}):", images.len());
    for img in &images {
        println!("- {} ({})", img.filename, img.file_path);
    }

    println!();
    println!("Blog database setup completed successfully!");

    Ok(())
}

fn cmd_init_config() -> anyhow::Result<()> {
    let path = Config::default_config_path();

    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    Config::default().save_to_path(&path)?;
    println!("Created default config file: {}", path.display());

    Ok(())
}

fn print_help() {
    println!("Inkpot - A small blog engine");
    println!();
    println!("USAGE:");
    println!("  inkpot <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("  serve             Run the web server against the existing database");
    println!("  setup             Recreate the database from scratch and seed demo content");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  inkpot setup      # Provision a clean blog.db with demo content");
    println!("  inkpot serve      # Serve the blog at the configured host/port");
}
