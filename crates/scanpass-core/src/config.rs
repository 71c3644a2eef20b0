/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`. Each field maps to the upper-cased
/// env var of the same name (`database_url` reads `DATABASE_URL`); optional
/// settings carry a `#[serde(default = "...")]`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment.
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from explicit key/value pairs instead of the process environment.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
