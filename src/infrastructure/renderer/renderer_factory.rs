use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::Renderer;
use crate::presentation::config::{RendererProviderSetting, RendererSettings};

use super::chrome_renderer::ChromeRenderer;
use super::mock_renderer::MockRenderer;

pub struct RendererFactory;

impl RendererFactory {
    pub fn create(settings: &RendererSettings) -> Arc<dyn Renderer> {
        match settings.provider {
            RendererProviderSetting::Chrome => {
                tracing::info!(binary = %settings.chrome_path, "Using headless Chrome renderer");
                Arc::new(
                    ChromeRenderer::new(&settings.chrome_path)
                        .with_args(settings.chrome_args.iter().cloned()),
                )
            }
            RendererProviderSetting::Mock => {
                tracing::warn!(
                    delay_ms = settings.mock_delay_ms,
                    "Using mock renderer: captures are blank images"
                );
                Arc::new(MockRenderer::new(Duration::from_millis(
                    settings.mock_delay_ms,
                )))
            }
        }
    }
}
