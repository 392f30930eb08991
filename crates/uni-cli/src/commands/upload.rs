//! `unidash upload FILE...`: replace backend data from spreadsheets.

use serde::Serialize;
use uni_api::Transport;
use uni_auth::Access;
use uni_upload::{CandidateFile, UploadController, UploadError};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::UploadBar;

#[derive(Debug, Serialize)]
struct UploadOutput {
    message: String,
    total_rows: u64,
    counts: std::collections::BTreeMap<String, u64>,
}

pub async fn handle<T: Transport>(
    args: &UploadArgs,
    ctx: &AppContext<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require(Access::AdminOnly).await?;
    let mut controller = controller(args, ctx);

    let files = args
        .files
        .iter()
        .map(CandidateFile::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    select(&mut controller, files)?;

    let bar = UploadBar::follow(controller.subscribe_progress(), "uploading");
    match controller.upload().await {
        Ok(summary) => {
            bar.finish_ok("done");
            output(
                &UploadOutput {
                    message: summary.message.clone(),
                    total_rows: summary.counts.values().sum(),
                    counts: summary.counts,
                },
                flags.format,
            )
        }
        Err(error) => {
            bar.finish_err();
            Err(error.into())
        }
    }
}

fn controller<T: Transport>(args: &UploadArgs, ctx: &AppContext<T>) -> UploadController<T> {
    let mut config = ctx.config.upload.clone();
    config.allow_csv |= args.csv;
    UploadController::new(ctx.client.clone(), &config).with_bus(ctx.bus.clone())
}

/// One file uses the single-file field; several go out as one batch.
fn select<T: Transport>(
    controller: &mut UploadController<T>,
    mut files: Vec<CandidateFile>,
) -> Result<(), UploadError> {
    if files.len() == 1 {
        controller.select_file(files.pop())?;
    } else {
        controller.select_files(files)?;
    }
    Ok(())
}
