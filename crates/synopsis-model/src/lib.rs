pub mod mapping;
pub mod synopsis;
pub mod report;

pub use mapping::*;
pub use synopsis::*;
pub use report::*;
