use serde::{de::DeserializeOwned, Serialize};

/// Name-only reference list (company, courier, design, portal).
///
/// Masters are created from a bare name and deleted by that name; there is
/// no id or further structure.
pub trait MasterRecord:
    Clone + Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug
{
    /// Column title shown in tables
    const TITLE: &'static str;

    fn name(&self) -> &str;

    fn from_name(name: String) -> Self;
}
