mod fs;
mod memfs_tracer;
mod path_interpreter;

pub use fs::*;
pub use memfs_tracer::*;
pub use path_interpreter::*;
