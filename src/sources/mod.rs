pub mod demo;
pub mod traits;

pub use demo::DemoSeed;
pub use traits::PropertySource;
