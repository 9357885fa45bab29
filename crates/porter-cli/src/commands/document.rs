use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DownloadResponse {
    id: String,
    path: String,
    bytes: usize,
}

/// Handle `porter document`.
pub async fn handle(
    action: &DocumentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if ctx.is_example() {
        anyhow::bail!("document: not available in example mode");
    }

    match action {
        DocumentCommands::Upload { path } => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = file_name(path)?;
            let document = ctx
                .client
                .upload_document(&file_name, bytes, ctx.known_building_id())
                .await
                .map_err(|error| ctx.api_error(&error))?;
            output(&document, flags.format)
        }
        DocumentCommands::View { id } => {
            let link = ctx
                .client
                .view_document(id)
                .await
                .map_err(|error| ctx.api_error(&error))?;
            output(&link, flags.format)
        }
        DocumentCommands::Download { id, out } => {
            let bytes = ctx
                .client
                .download_document(id)
                .await
                .map_err(|error| ctx.api_error(&error))?;
            match out {
                Some(out) => {
                    tokio::fs::write(out, &bytes)
                        .await
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    output(
                        &DownloadResponse {
                            id: id.clone(),
                            path: out.display().to_string(),
                            bytes: bytes.len(),
                        },
                        flags.format,
                    )
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes).context("failed to write to stdout")?;
                    stdout.flush().context("failed to flush stdout")
                }
            }
        }
    }
}

fn file_name(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::file_name;

    #[test]
    fn file_name_is_last_component() {
        assert_eq!(
            file_name(Path::new("/tmp/minutes/agm-2024.pdf")).unwrap(),
            "agm-2024.pdf"
        );
    }

    #[test]
    fn directory_root_has_no_file_name() {
        assert!(file_name(Path::new("/")).is_err());
    }
}
