mod error;

pub mod prelude {
    pub use crate::error::{FixtureExistsError, MissingArtifactError};
}
