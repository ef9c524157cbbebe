use super::config::EngineConfig;
use super::error::EngineError;
use crate::content::ContentTables;

/// Read-only inputs shared by every engine operation.
#[derive(Debug, Clone, Default)]
pub struct EngineContext {
    pub content: ContentTables,
    pub config: EngineConfig,
}

impl EngineContext {
    pub fn new(content: ContentTables, config: EngineConfig) -> Self {
        Self { content, config }
    }

    /// Built-in content with default configuration.
    pub fn standard() -> Result<Self, EngineError> {
        let content = ContentTables::standard()?;
        Ok(Self::new(content, EngineConfig::default()))
    }
}
