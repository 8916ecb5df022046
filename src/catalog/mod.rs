//! Scene catalogs
//!
//! The catalog is the external collaborator that lists scenes for a
//! date window and region. Records carry metadata eagerly and pixels
//! lazily through a [`PixelSource`].

mod manifest;
mod query;
mod scene;
pub mod tile;
mod window;

pub use manifest::{BandImageSource, ManifestCatalog};
pub use query::{CatalogQuery, InMemoryCatalog, SceneCatalog};
pub use scene::{InMemoryPixels, PixelSource, SceneRecord};
pub use window::DateWindow;
