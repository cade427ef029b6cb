/// Settings for a [`crate::TokenStreamRewriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriterConfig {
    /// Program used by the calls that take no program name
    pub default_program: String,

    /// Operations preallocated per program
    pub program_capacity: usize,
}

impl RewriterConfig {
    pub const DEFAULT_PROGRAM_NAME: &'static str = "default";
    pub const PROGRAM_INIT_SIZE: usize = 100;

    pub fn new() -> Self {
        Self {
            default_program: Self::DEFAULT_PROGRAM_NAME.to_string(),
            program_capacity: Self::PROGRAM_INIT_SIZE,
        }
    }

    pub fn with_default_program(mut self, name: impl Into<String>) -> Self {
        self.default_program = name.into();
        self
    }

    pub fn with_program_capacity(mut self, capacity: usize) -> Self {
        self.program_capacity = capacity;
        self
    }
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self::new()
    }
}
