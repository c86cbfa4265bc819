mod store;

pub use store::FileHandoffStore;
pub use store::HandoffStore;
pub use store::MemoryHandoffStore;
pub use store::VERIFIER_KEY;
