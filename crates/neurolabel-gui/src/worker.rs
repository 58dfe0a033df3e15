use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;
use neurolabel_core::backend::AnnotationBackend;
use neurolabel_core::imaging::decode_image;
use neurolabel_core::library::LocalLibrary;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread owning `backend`. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    backend: Box<dyn AnnotationBackend>,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("neurolabel-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, backend);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, err: &anyhow::Error) {
    tracing::error!(error = %format!("{err:#}"), "Request failed");
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: format!("{err:#}"),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    mut backend: Box<dyn AnnotationBackend>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let outcome = match cmd {
            WorkerCommand::Detect { path, enhance } => {
                handle_detect(backend.as_mut(), &path, enhance, &tx, &ctx)
            }
            WorkerCommand::LoadHistory => send_history(backend.as_ref(), &tx, &ctx),
            WorkerCommand::OpenHistoryItem { id, filename } => {
                handle_open_history_item(backend.as_ref(), id, filename, &tx, &ctx)
            }
            WorkerCommand::SaveAnnotations { id, records } => backend
                .save_annotations(id, &records)
                .with_context(|| format!("Failed to save annotations for image {id}"))
                .map(|resp| {
                    send(
                        &tx,
                        &ctx,
                        WorkerResult::Saved {
                            image_id: id,
                            count: resp.count,
                        },
                    );
                }),
            WorkerCommand::DeleteImage { id } => {
                handle_delete(backend.as_mut(), id, &tx, &ctx)
            }
            WorkerCommand::OpenLibrary { config } => LocalLibrary::from_config(&config)
                .with_context(|| {
                    format!("Failed to open library at {}", config.library.root.display())
                })
                .and_then(|library| {
                    backend = Box::new(library);
                    send_log(
                        &tx,
                        &ctx,
                        format!("Library: {}", config.library.root.display()),
                    );
                    send_history(backend.as_ref(), &tx, &ctx)
                }),
        };

        if let Err(e) = outcome {
            send_error(&tx, &ctx, &e);
        }
    }
    tracing::debug!("Worker channel closed");
}

fn handle_detect(
    backend: &mut dyn AnnotationBackend,
    path: &Path,
    enhance: bool,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    send_log(tx, ctx, format!("Detecting: {filename}"));
    let resp = backend
        .detect(&filename, &bytes, enhance)
        .context("Error analyzing image")?;
    let image_id = resp.image_id;
    send(
        tx,
        ctx,
        WorkerResult::Detected {
            image_id,
            filename: resp.filename,
            detections: resp.detections,
        },
    );

    let image = decode_image(&bytes).context("Failed to decode image")?;
    send(tx, ctx, WorkerResult::ImageDecoded { image_id, image });

    send_history(backend, tx, ctx)
}

fn handle_open_history_item(
    backend: &dyn AnnotationBackend,
    id: i64,
    filename: String,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> anyhow::Result<()> {
    let detections = backend
        .annotations(id)
        .with_context(|| format!("Failed to load annotations for image {id}"))?;
    let bytes = backend
        .image(id)
        .with_context(|| format!("Failed to load image {id}"))?;
    send(
        tx,
        ctx,
        WorkerResult::HistoryItemLoaded {
            image_id: id,
            filename,
            detections,
        },
    );

    let image = decode_image(&bytes).context("Failed to decode image")?;
    send(tx, ctx, WorkerResult::ImageDecoded { image_id: id, image });
    Ok(())
}

fn handle_delete(
    backend: &mut dyn AnnotationBackend,
    id: i64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> anyhow::Result<()> {
    backend
        .delete_image(id)
        .with_context(|| format!("Failed to delete image {id}"))?;
    send(tx, ctx, WorkerResult::Deleted { image_id: id });
    send_history(backend, tx, ctx)
}

fn send_history(
    backend: &dyn AnnotationBackend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> anyhow::Result<()> {
    let entries = backend.history().context("Failed to load history")?;
    send(tx, ctx, WorkerResult::History { entries });
    Ok(())
}
