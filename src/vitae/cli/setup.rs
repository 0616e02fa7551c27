use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use vitae::export::{ExportFormat, MarkdownLayout};
use vitae::model::Collection;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    static VERSION_STRING: Lazy<String> = Lazy::new(|| {
        let version = env!("CARGO_PKG_VERSION");
        let hash = env!("GIT_HASH");
        if env!("IS_RELEASE") == "true" || hash.is_empty() {
            version.to_string()
        } else {
            format!("{}@{} {}", version, hash, env!("GIT_COMMIT_DATE"))
        }
    });
    VERSION_STRING.as_str()
}

#[derive(Parser, Debug)]
#[command(name = "vitae", bin_name = "vitae", version = get_version())]
#[command(about = "Edit a structured resume from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the stored resume (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resume
    Show {
        /// Print the stored JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Set a text field (name, contact.<key>, <collection>.<n>.<field>)
    Set { path: String, value: String },

    /// Append a blank entry to a collection
    Add { collection: Collection },

    /// Delete an entry by id
    #[command(alias = "rm")]
    Delete { collection: Collection, id: String },

    /// Move the entry at one position to another (positions start at 1)
    #[command(alias = "mv")]
    Move {
        collection: Collection,
        from: usize,
        to: usize,
    },

    /// Apply a drag gesture between two handles (<collection>-<id>)
    Drag {
        active: String,
        /// Omit to simulate a cancelled drag
        over: Option<String>,
    },

    /// Edit accomplishment bullets
    Bullet {
        #[command(subcommand)]
        action: BulletCommands,
    },

    /// Set the date range of an entry
    Dates {
        collection: Collection,
        id: String,
        #[arg(long, default_value = "")]
        start: String,
        #[arg(long, conflicts_with = "current")]
        end: Option<String>,
        /// Still ongoing; clears the end date
        #[arg(long)]
        current: bool,
    },

    /// Manage contact fields
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },

    /// Export the resume (markdown, json, bundle)
    Export {
        format: ExportFormat,
        /// Target file or directory; "-" writes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Markdown layout (minimal, creative)
        #[arg(long, default_value_t)]
        layout: MarkdownLayout,
    },

    /// Discard the resume and start over from the template
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum BulletCommands {
    /// Append an empty bullet
    Add { collection: Collection, id: String },
    /// Replace the text of bullet <n>
    Set {
        collection: Collection,
        id: String,
        n: usize,
        value: String,
    },
    /// Remove bullet <n>
    #[command(alias = "rm")]
    Delete {
        collection: Collection,
        id: String,
        n: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add an empty contact field
    Add { key: String },
    /// Remove a contact field and its icon
    #[command(alias = "rm")]
    Remove { key: String },
    /// Pick the icon of a field; "none" removes the field
    Icon { key: String, icon: String },
    /// List suggested fields not on the resume yet
    Suggest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_move() {
        let cli = Cli::try_parse_from(["vitae", "move", "exp", "2", "1"]).unwrap();
        match cli.command {
            Some(Commands::Move {
                collection,
                from,
                to,
            }) => {
                assert_eq!(collection, Collection::Experience);
                assert_eq!((from, to), (2, 1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_export_format() {
        let cli = Cli::try_parse_from(["vitae", "export", "md", "-o", "-"]).unwrap();
        match cli.command {
            Some(Commands::Export {
                format,
                output,
                layout,
            }) => {
                assert_eq!(format, ExportFormat::Markdown);
                assert_eq!(output, Some(PathBuf::from("-")));
                assert_eq!(layout, MarkdownLayout::Minimal);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_export_layout() {
        let cli = Cli::try_parse_from(["vitae", "export", "bundle", "--layout", "creative"]).unwrap();
        match cli.command {
            Some(Commands::Export { layout, .. }) => assert_eq!(layout, MarkdownLayout::Creative),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_collection() {
        assert!(Cli::try_parse_from(["vitae", "add", "hobbies"]).is_err());
    }

    #[test]
    fn end_and_current_conflict() {
        let args = [
            "vitae", "dates", "exp", "e1", "--end", "2020-01", "--current",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
