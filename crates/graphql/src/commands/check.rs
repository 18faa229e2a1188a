use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use graphql_engine_parser::parse_executable_document;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        default_values_t=["graphql".to_string()],
        help="File extension to check when walking a directory. May be \
             repeated or comma-separated. Files named directly are always \
             checked.",
        long="recursive-extension",
        value_delimiter=',',
        value_name="EXT",
    )]
    pub(crate) recursive_extensions: Vec<String>,

    #[arg(
        help="GraphQL files, or directories to search for GraphQL files.",
        name="PATHS",
        required=true,
    )]
    pub(crate) paths: Vec<PathBuf>,
}

/// The files to check, plus a message for each path that could not be
/// walked.
#[derive(Debug, Default)]
pub(crate) struct FileSet {
    pub(crate) files: Vec<PathBuf>,
    pub(crate) faults: Vec<String>,
}

impl CheckCmd {
    fn extensions(&self) -> HashSet<&str> {
        self.recursive_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect()
    }

    pub(crate) fn collect_files(&self) -> FileSet {
        let extensions = self.extensions();
        let mut file_set = FileSet::default();
        log::debug!("Scanning {} input paths...", self.paths.len());

        for root in &self.paths {
            // Named files are checked whatever their extension.
            if root.is_file() {
                file_set.files.push(root.clone());
                continue;
            }
            for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        let path = entry.path();
                        let matches = path
                            .extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| extensions.contains(ext));
                        if matches {
                            file_set.files.push(path.to_path_buf());
                        } else {
                            log::trace!("Skipping {path:?}.");
                        }
                    },
                    Ok(_) => (),
                    Err(err) => {
                        log::debug!("Failed to walk {root:?}: {err}");
                        file_set.faults.push(format!("{}: {err}", root.display()));
                    },
                }
            }
        }
        file_set
    }
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let FileSet { files, mut faults } = self.collect_files();
        log::debug!("Found {} GraphQL files to check.", files.len());

        for path in &files {
            match check_file(path).await {
                Ok(None) => log::debug!("{} parsed cleanly.", path.display()),
                Ok(Some(fault)) => faults.push(fault),
                Err(err) => faults.push(format!("{}: {err:#}", path.display())),
            }
        }

        if faults.is_empty() {
            CommandResult::stdout(format_args!(
                "{} Checked {} GraphQL files.",
                output_utils::GREEN_CHECK,
                files.len(),
            ))
        } else {
            CommandResult::stderr(format_args!(
                "{}\n{} Found {} errors in {} files checked.",
                faults.join("\n"),
                output_utils::RED_X,
                faults.len(),
                files.len(),
            ))
        }
    }
}

/// Parses the file at `path`, returning its syntax error as
/// `file:line:column: error: message`.
pub(crate) async fn check_file(path: &Path) -> anyhow::Result<Option<String>> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(parse_executable_document(&source).err().map(|err| {
        let file_name = path.display().to_string();
        log::debug!("{}", err.format_detailed(&file_name, &source));
        format!("{file_name}:{}", err.format_oneline())
    }))
}
