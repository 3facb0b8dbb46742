use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Default, Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (the default).
    #[default]
    Serve,
    /// Print the opening research brief for a question.
    Prompt(PromptArgs),
    /// List schema names, or print one JSON Schema.
    Schema(SchemaArgs),
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct PromptArgs {
    /// The research question. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl PromptArgs {
    #[must_use]
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `dispatch_request`. Omit to list all names.
    pub name: Option<String>,
}
