use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    PlainText,
    Rust,
    Go,
    Python,
    JavaScript,
    TypeScript,
    C,
    Cpp,
    Java,
    Json,
    Toml,
    Yaml,
    Markdown,
    Html,
    Css,
    Shell,
}

const ALL: [LanguageId; 16] = [
    LanguageId::PlainText,
    LanguageId::Rust,
    LanguageId::Go,
    LanguageId::Python,
    LanguageId::JavaScript,
    LanguageId::TypeScript,
    LanguageId::C,
    LanguageId::Cpp,
    LanguageId::Java,
    LanguageId::Json,
    LanguageId::Toml,
    LanguageId::Yaml,
    LanguageId::Markdown,
    LanguageId::Html,
    LanguageId::Css,
    LanguageId::Shell,
];

impl LanguageId {
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return Self::PlainText;
        };
        match ext.to_ascii_lowercase().as_str() {
            "rs" => Self::Rust,
            "go" => Self::Go,
            "py" | "pyi" => Self::Python,
            "js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
            "ts" | "mts" | "cts" | "tsx" => Self::TypeScript,
            "c" => Self::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" | "h" => Self::Cpp,
            "java" => Self::Java,
            "json" => Self::Json,
            "toml" => Self::Toml,
            "yaml" | "yml" => Self::Yaml,
            "md" | "markdown" => Self::Markdown,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "sh" | "bash" | "zsh" => Self::Shell,
            _ => Self::PlainText,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL.into_iter().find(|lang| lang.id() == id)
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::PlainText => "plaintext",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Css => "css",
            Self::Shell => "shell",
        }
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::PlainText
    }
}
