pub mod handles;
pub mod projection;
pub mod surface;

pub use handles::Handle;
pub use projection::{Projection, Write};
pub use surface::MemorySurface;
