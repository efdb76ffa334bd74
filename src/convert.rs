//! Hook for converting lyrics between regional script variants.
//!
//! The conversion tables live outside this crate; hosts plug them in through
//! [`ScriptConverter`].

/// Converts text between script variants of one language (e.g. Simplified/Traditional Chinese).
pub trait ScriptConverter: Send + Sync {
    fn convert(&self, text: &str) -> String;
}

impl<F> ScriptConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert(&self, text: &str) -> String {
        self(text)
    }
}

/// Language tags whose script variants the converter knows how to map.
pub fn is_convertible_language(language: Option<&str>) -> bool {
    language.is_some_and(|tag| tag.starts_with("zh"))
}
