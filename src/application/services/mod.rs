mod capture_worker;
mod dispatcher;
mod pool_config;
mod renderer_pool;
mod retention_sweeper;
mod work_queue;

pub use capture_worker::{CaptureWorker, CaptureWorkerError};
pub use dispatcher::{DispatchError, Dispatcher};
pub use pool_config::PoolConfig;
pub use renderer_pool::{PoolHandle, RendererPool};
pub use retention_sweeper::RetentionSweeper;
pub use work_queue::{CaptureMessage, QueueError, WorkQueue};
