mod memory;
mod traits;

pub use memory::MemoryCategoryStore;
pub use traits::{CategoryStore, StoreError};
