use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use bijochat::Config;
use bijochat::chat::{ChatRequest, ConversationMessage, failure_message};
use bijochat::gateway::{AppState, run_gateway};
use bijochat::media::{FileCategory, FileNormalizer, UploadedFile};
use bijochat::persona::PersonaSet;
use std::path::Path;
use tracing::{info, warn};

async fn normalize_path(path: &Path, mime: Option<String>) -> Result<UploadedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let uploaded = FileNormalizer::new()
        .classify_blocking(bytes, mime.unwrap_or_default(), file_name)
        .await?;
    Ok(uploaded)
}

/// Images ride along as data URLs. Files without readable content only
/// carry the normalizer's description, so the model is told what arrived.
fn attach(turn: ConversationMessage, uploaded: UploadedFile) -> ConversationMessage {
    let category = uploaded.category;
    if category == FileCategory::Image {
        return turn.with_image(uploaded.data);
    }
    if category.carries_content() {
        info!(%category, file_name = uploaded.file_name.as_str(), "Attached file content");
        turn.with_file(uploaded.data)
    } else {
        warn!(
            %category,
            file_name = uploaded.file_name.as_str(),
            "No readable content, attaching a description only"
        );
        turn.with_file(format!(
            "[{} attachment {}, content not readable] {}",
            category, uploaded.file_name, uploaded.data
        ))
    }
}

async fn run_ask(
    config: &Config,
    message: String,
    mode: Option<String>,
    image: Option<&Path>,
    file: Option<&Path>,
) -> Result<()> {
    let state = AppState::from_config(config)?;
    let dispatcher = state.dispatcher;

    let mut turn = ConversationMessage::user(message);
    if let Some(path) = image {
        let uploaded = normalize_path(path, None).await?;
        if uploaded.category != FileCategory::Image {
            bail!(
                "{} is not an image (classified as {})",
                path.display(),
                uploaded.category
            );
        }
        turn = turn.with_image(uploaded.data);
    }
    if let Some(path) = file {
        let uploaded = normalize_path(path, None).await?;
        turn = attach(turn, uploaded);
    }

    let request = ChatRequest {
        messages: vec![turn],
        mode,
    };
    let persona = dispatcher.persona_for(request.mode.as_deref());
    match dispatcher.respond(&request).await {
        Ok(reply) => {
            println!("{}", reply.content);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e, persona));
            Err(anyhow::Error::new(e).context("Chat turn failed"))
        }
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting bijochat gateway on {host} (random port)");
            } else {
                info!("Starting bijochat gateway on {host}:{port}");
            }
            run_gateway(&host, port, config).await
        }

        Commands::Ask {
            message,
            mode,
            image,
            file,
        } => run_ask(&config, message, mode, image.as_deref(), file.as_deref()).await,

        Commands::Classify { path, mime } => {
            let uploaded = normalize_path(&path, mime).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&uploaded).context("Failed to serialize result")?
            );
            Ok(())
        }

        Commands::Personas => {
            let personas = PersonaSet::builtin();
            let default_id = personas.default_profile().id.clone();
            for persona in personas.iter() {
                let marker = if persona.id == default_id { " (default)" } else { "" };
                println!("{:<8} {}{marker}", persona.id, persona.name);
            }
            Ok(())
        }
    }
}
