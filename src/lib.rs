pub mod assembler;
pub mod converter;
pub mod geometry;
pub mod osm;
pub mod pipeline;
pub mod tags;

pub use assembler::*;
pub use converter::*;
pub use geometry::*;
pub use osm::*;
pub use pipeline::*;
pub use tags::*;
