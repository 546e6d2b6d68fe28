//! CLI commands

mod changelog;
mod completions;
mod init;
mod page;
mod status;
mod validate;
mod version;

pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use page::PageCommand;
pub use status::StatusCommand;
pub use validate::ValidateCommand;
pub use version::VersionCommand;
