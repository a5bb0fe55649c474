mod repositories;

pub use repositories::InMemoryJobRepository;
