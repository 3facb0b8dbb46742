use anyhow::bail;
use delve_config::DelveConfig;
use delve_mcp::prompts::opening_prompt;

use crate::cli::root_commands::PromptArgs;

/// Handle `delve prompt`.
pub fn handle(args: &PromptArgs, config: &DelveConfig) -> anyhow::Result<()> {
    let question = args.question();
    let question = question.trim();
    if question.is_empty() {
        bail!("research question must not be empty");
    }
    println!("{}", opening_prompt(question, &config.workflow));
    Ok(())
}
