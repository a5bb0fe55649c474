mod chrome_renderer;
mod encoding;
mod mock_renderer;
mod renderer_factory;

pub use chrome_renderer::{ChromeRenderer, network_error_code};
pub use mock_renderer::{MockOutcome, MockRenderer};
pub use renderer_factory::RendererFactory;
