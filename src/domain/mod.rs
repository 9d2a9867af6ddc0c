pub mod address;
pub mod placemark;
pub mod table;

pub use address::Address;
pub use placemark::Placemark;
pub use table::{ColumnShapeError, PlacemarkTable};
