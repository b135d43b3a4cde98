//! Product image generation command.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use bazaar_imagegen::{GeminiClient, ImageQueue, ImageRef};
use serde::Serialize;

use super::ImageArgs;
use crate::context::Context;
use crate::output::truncate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedImage {
    term: String,
    image: ImageRef,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the image command.
pub async fn run(args: ImageArgs, ctx: &Context) -> Result<()> {
    let images = &ctx.config.images;
    let client = GeminiClient::from_env(&images.api_key_env)
        .context("Image generation needs an API key")?
        .with_model(images.model.clone());
    ctx.output.debug(&format!("Using model {}", client.model()));

    let queue = ImageQueue::new(Arc::new(client), images.queue_config());

    let spinner = ctx.output.spinner(&format!(
        "Generating {} image(s), one every {}s...",
        args.terms.len(),
        images.throttle_secs
    ));
    let results = queue.request_all(args.terms.iter().cloned()).await;
    spinner.finish_and_clear();
    queue.shutdown();

    let generated: Vec<GeneratedImage> = args
        .terms
        .into_iter()
        .zip(results)
        .map(|(term, result)| match result {
            Ok(image) => GeneratedImage {
                term,
                image,
                fallback: false,
                error: None,
            },
            Err(e) => GeneratedImage {
                term,
                image: ImageRef::from(args.fallback.as_str()),
                fallback: true,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&generated);
        return Ok(());
    }

    ctx.output.header("Images");
    for item in &generated {
        match &item.error {
            None => ctx.output.success(&format!(
                "{}: {} ({} bytes)",
                item.term,
                truncate(item.image.as_str(), 48),
                item.image.as_str().len()
            )),
            Some(error) => ctx.output.warn(&format!(
                "{}: using fallback ({})",
                item.term, error
            )),
        }
    }

    Ok(())
}
