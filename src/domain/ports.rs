use crate::utils::error::Result;

/// Key-value session storage, modelled on browser local storage.
pub trait Storage: Send + Sync {
    /// A stored value that cannot be decoded as text is returned as an empty
    /// string, which session loading treats as corrupt.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a key that does not exist is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
