pub mod error;
pub mod logging;
pub mod util;

pub mod archive;
pub mod bundle;
pub mod cache;
pub mod classpath;
pub mod model;
pub mod resolver;

pub use bundle::Bundle;
pub use error::{LoadpathError, Result};
pub use model::{DataReader, Resource, Source};
pub use resolver::Loadpath;
