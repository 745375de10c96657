use adstudio::logger::{self, LogLevel, LoggerConfig};
use adstudio::models::ImageData;
use adstudio::{Backend, Driver, HttpGateway, ImageAction, ImageStudio, StudioConfig};
use std::env;
use std::fs;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = StudioConfig::from_env();
    logger::init_with_config(
        LoggerConfig::development().with_level(config.log_level.unwrap_or(LogLevel::Info)),
    )?;
    if !dotenv_loaded {
        log::warn!("No .env file found, using system environment variables");
    }
    logger::log_config_info(&config);

    let gateway = match HttpGateway::new(config) {
        Ok(gateway) => gateway,
        Err(e) => {
            log::error!("Failed to initialize gateway: {}", e);
            return Err(e.into());
        }
    };

    match gateway.health().await {
        Ok(health) if health.is_healthy() => log::info!(
            "Backend healthy (ai service: {}, model: {})",
            health.ai_service.as_deref().unwrap_or("unknown"),
            health.model.as_deref().unwrap_or("unknown")
        ),
        Ok(health) => log::warn!("Backend reports status '{}'", health.status),
        Err(e) => log::warn!("Health check failed: {}", e),
    }

    let prompt = env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");

    let mut studio: Driver<ImageStudio> = Driver::new(Arc::new(gateway));
    studio.run(ImageAction::LoadHistory).await;
    log::info!(
        "History holds {} of {} images",
        studio.state().images.len(),
        studio.state().total
    );

    if prompt.trim().is_empty() {
        log::info!("No prompt given, using an example prompt");
        studio.run(ImageAction::UseExample(0)).await;
    } else {
        studio
            .run(ImageAction::EditPrompt {
                field: "prompt".to_string(),
                value: prompt,
            })
            .await;
    }

    let state = studio.run(ImageAction::Generate).await;
    if let Some(error) = &state.error {
        log::error!("Image generation failed ({:?}): {}", error.kind, error.message);
        return Ok(());
    }

    if let Some(image) = state.current_image() {
        let filename = image.download_name();
        match image.decode() {
            Ok(bytes) => match fs::write(&filename, bytes) {
                Ok(_) => log::info!("Image saved to: {}", filename),
                Err(e) => log::error!("Failed to save image: {}", e),
            },
            Err(e) => log::error!("Failed to decode image: {}", e),
        }
    }

    Ok(())
}
