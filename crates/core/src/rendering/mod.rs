pub mod domain;
pub mod infrastructure;
pub mod renderer_cache;
