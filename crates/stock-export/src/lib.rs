pub mod board;
pub mod dfd;
pub mod errors;
pub mod manifest;
pub mod metadata;
pub mod svg;

pub use board::technical_board_svg;
pub use dfd::{dfd_svg, EXPLOSION_FACTOR, VIEW_SCALE};
pub use errors::ExportError;
pub use manifest::{stock_manifest, StockManifest, MANIFEST_FORMAT, MANIFEST_VERSION};
pub use metadata::ExportMetadata;
