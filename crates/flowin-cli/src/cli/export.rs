//! `flowin export` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use flowin_core::{
    params::{ExportReflections, ExportTasks},
    Export, OperationStatus,
};
use log::info;

use super::{Cli, ExportFormatArg, TaskStatusArg};

/// Date window and destination shared by every export.
#[derive(Args)]
pub struct ExportTarget {
    #[arg(short, long, value_enum, default_value_t, help = "Output format")]
    pub format: ExportFormatArg,
    #[arg(long, help = "Only records created on or after this day (YYYY-MM-DD, UTC)")]
    pub start: Option<String>,
    #[arg(long, help = "Only records created on or before this day (YYYY-MM-DD, UTC)")]
    pub end: Option<String>,
    #[arg(
        short,
        long,
        help = "File or directory to write to; prints to stdout when omitted"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportTasksArgs {
    #[command(flatten)]
    pub target: ExportTarget,
    #[arg(short, long, help = "Only tasks with this status")]
    pub status: Option<TaskStatusArg>,
}

#[derive(Args)]
pub struct ExportReflectionsArgs {
    #[command(flatten)]
    pub target: ExportTarget,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export tasks
    #[command(alias = "t")]
    Tasks(ExportTasksArgs),
    /// Export reflections
    #[command(alias = "r")]
    Reflections(ExportReflectionsArgs),
}

/// Resolves where an export lands: a directory gets the export's own file
/// name, anything else is taken as the file path.
fn destination(output: &Path, export: &Export) -> PathBuf {
    if output.is_dir() {
        output.join(&export.filename)
    } else {
        output.to_path_buf()
    }
}

impl Cli {
    pub async fn handle_export_command(&self, command: ExportCommands) -> Result<()> {
        let user = self.user().await?;
        let (export, output) = match command {
            ExportCommands::Tasks(ExportTasksArgs { target, status }) => {
                let params = ExportTasks {
                    format: target.format.into(),
                    start_date: target.start,
                    end_date: target.end,
                    status: status.map(Into::into),
                };
                (self.planner.export_tasks(&user, &params).await?, target.output)
            }
            ExportCommands::Reflections(ExportReflectionsArgs { target }) => {
                let params = ExportReflections {
                    format: target.format.into(),
                    start_date: target.start,
                    end_date: target.end,
                };
                (
                    self.planner.export_reflections(&user, &params).await?,
                    target.output,
                )
            }
        };

        match output {
            Some(output) => {
                let path = destination(&output, &export);
                std::fs::write(&path, &export.data)
                    .with_context(|| format!("Failed to write export to {}", path.display()))?;
                info!("Wrote {} bytes to {}", export.data.len(), path.display());
                self.render(OperationStatus::success(format!(
                    "Exported to {}",
                    path.display()
                )))
            }
            None => {
                println!("{}", export.data);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flowin_core::ExportFormat;
    use tempfile::TempDir;

    use super::*;

    fn export() -> Export {
        Export {
            format: ExportFormat::Csv,
            data: String::new(),
            filename: "tasks_2025-01-20.csv".to_string(),
        }
    }

    #[test]
    fn test_destination_directory_uses_export_filename() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            destination(dir.path(), &export()),
            dir.path().join("tasks_2025-01-20.csv")
        );
    }

    #[test]
    fn test_destination_file_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mine.csv");
        assert_eq!(destination(&file, &export()), file);
    }
}
