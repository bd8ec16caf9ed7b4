pub mod reconstructor;

pub use reconstructor::RunHistory;
