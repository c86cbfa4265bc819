use crate::{
    error, info,
    management::{FileHandoffStore, HandoffStore, VERIFIER_KEY},
    success,
};

/// Discards a code verifier left behind by an unfinished sign-in.
pub async fn reset() {
    let store = FileHandoffStore::default_location();
    match store.remove(VERIFIER_KEY).await {
        Ok(true) => success!("Removed stored code verifier."),
        Ok(false) => info!("No stored code verifier."),
        Err(e) => error!("Failed to reset {}: {}", store.path().display(), e),
    }
}
