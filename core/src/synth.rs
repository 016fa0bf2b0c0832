use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::download::download_pptx;
use crate::error::SynthError;
use crate::session::{parse_upload_body, DownloadTicket, Session, UploadTicket};
use slidesynth_common::UploadResponse;
use slidesynth_protocol::{Event, HealthState, Op, ProcessingState};

/// Results of spawned network work, fed back into the driver loop.
#[derive(Debug)]
enum TaskUpdate {
    Stage {
        generation: u64,
        state: ProcessingState,
    },
    UploadFinished {
        generation: u64,
        result: crate::Result<UploadResponse>,
    },
    DownloadFinished {
        generation: u64,
        result: crate::Result<PathBuf>,
    },
    Health(HealthState),
}

/// Handle to a running session driver.
///
/// The driver task owns the [`Session`]; user operations go in through
/// [`submit`](Synth::submit) and every change comes back out of
/// [`next_event`](Synth::next_event) as a full `SessionUpdated` snapshot.
#[derive(Clone)]
pub struct Synth {
    inner: Arc<Inner>,
}

struct Inner {
    tx_submit: mpsc::Sender<Op>,
    rx_event: Mutex<mpsc::Receiver<Event>>,
}

pub struct SynthSpawnOk {
    pub synth: Synth,
}

impl Synth {
    pub async fn spawn(backend: Arc<dyn Backend>, download_dir: PathBuf) -> Result<SynthSpawnOk> {
        let (tx_submit, rx_submit) = mpsc::channel::<Op>(64);
        let (tx_event, rx_event) = mpsc::channel::<Event>(256);
        let (tx_task, rx_task) = mpsc::channel::<TaskUpdate>(64);

        let driver = Driver {
            session: Session::new(),
            backend,
            download_dir,
            tx_event,
            tx_task,
        };
        tokio::spawn(driver.run(rx_submit, rx_task));

        let inner = Arc::new(Inner {
            tx_submit,
            rx_event: Mutex::new(rx_event),
        });
        Ok(SynthSpawnOk {
            synth: Synth { inner },
        })
    }

    pub async fn submit(&self, op: Op) -> Result<()> {
        self.inner
            .tx_submit
            .send(op)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }

    pub async fn next_event(&self) -> Option<Event> {
        let mut rx = self.inner.rx_event.lock().await;
        rx.recv().await
    }
}

/// Ask the backend whether it is reachable.
pub async fn check_health(backend: &dyn Backend) -> HealthState {
    match backend.health().await {
        Ok(status) => HealthState::Healthy { status },
        Err(err) => HealthState::Unreachable {
            message: err.to_string(),
        },
    }
}

struct Driver {
    session: Session,
    backend: Arc<dyn Backend>,
    download_dir: PathBuf,
    tx_event: mpsc::Sender<Event>,
    tx_task: mpsc::Sender<TaskUpdate>,
}

impl Driver {
    async fn run(mut self, mut rx_submit: mpsc::Receiver<Op>, mut rx_task: mpsc::Receiver<TaskUpdate>) {
        self.publish().await;
        loop {
            tokio::select! {
                maybe_op = rx_submit.recv() => match maybe_op {
                    Some(Op::Shutdown) | None => {
                        let _ = self.tx_event.send(Event::ShutdownComplete).await;
                        break;
                    }
                    Some(op) => self.handle_op(op).await,
                },
                Some(update) = rx_task.recv() => self.handle_task(update).await,
            }
        }
        debug!("session driver stopped");
    }

    async fn handle_op(&mut self, op: Op) {
        debug!(?op, "op");
        match op {
            Op::SelectFile { path } => match self.session.begin_upload(&path) {
                Ok(ticket) => self.spawn_upload(ticket),
                Err(err) => debug!(%err, "upload not started"),
            },
            Op::NextSlide => {
                self.session.next_slide();
            }
            Op::PreviousSlide => {
                self.session.previous_slide();
            }
            Op::SelectSlide { index } => {
                self.session.select_slide(index);
            }
            Op::DownloadPptx => match self.session.download_ticket() {
                Some(ticket) => self.spawn_download(ticket),
                None => debug!("nothing to download"),
            },
            Op::Reset => self.session.reset(),
            Op::CheckHealth => {
                let _ = self.tx_event.send(Event::Health(HealthState::Checking)).await;
                self.spawn_health();
            }
            Op::Shutdown => {}
        }
        self.publish().await;
    }

    async fn handle_task(&mut self, update: TaskUpdate) {
        let changed = match update {
            TaskUpdate::Stage { generation, state } => self.session.advance(generation, state),
            TaskUpdate::UploadFinished { generation, result } => {
                self.session.finish_upload(generation, result)
            }
            TaskUpdate::DownloadFinished { generation, result } => match result {
                Ok(path) if generation == self.session.generation() => {
                    let _ = self.tx_event.send(Event::DownloadSaved { path }).await;
                    false
                }
                Ok(path) => {
                    debug!(path = %path.display(), "download finished after reset");
                    false
                }
                Err(_) => self.session.fail_download(generation),
            },
            TaskUpdate::Health(state) => {
                let _ = self.tx_event.send(Event::Health(state)).await;
                false
            }
        };
        if changed {
            self.publish().await;
        }
    }

    fn spawn_upload(&self, ticket: UploadTicket) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx_task.clone();
        tokio::spawn(async move {
            let UploadTicket {
                generation,
                path,
                file_name,
            } = ticket;
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    let message = format!("Could not read {}: {err}", path.display());
                    let result = Err(SynthError::Transport { message });
                    let _ = tx.send(TaskUpdate::UploadFinished { generation, result }).await;
                    return;
                }
            };
            info!(file = %file_name, size = bytes.len(), "uploading");
            let _ = tx
                .send(TaskUpdate::Stage {
                    generation,
                    state: ProcessingState::Processing,
                })
                .await;
            let result = match backend.upload_pdf(file_name, bytes).await {
                Ok(body) => {
                    let _ = tx
                        .send(TaskUpdate::Stage {
                            generation,
                            state: ProcessingState::Generating,
                        })
                        .await;
                    parse_upload_body(&body)
                }
                Err(err) => Err(SynthError::from_upload(err)),
            };
            let _ = tx.send(TaskUpdate::UploadFinished { generation, result }).await;
        });
    }

    fn spawn_download(&self, ticket: DownloadTicket) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx_task.clone();
        let dir = self.download_dir.clone();
        tokio::spawn(async move {
            let result = download_pptx(backend.as_ref(), &ticket.filename, &dir).await;
            let _ = tx
                .send(TaskUpdate::DownloadFinished {
                    generation: ticket.generation,
                    result,
                })
                .await;
        });
    }

    fn spawn_health(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx_task.clone();
        tokio::spawn(async move {
            let state = check_health(backend.as_ref()).await;
            let _ = tx.send(TaskUpdate::Health(state)).await;
        });
    }

    async fn publish(&self) {
        let _ = self
            .tx_event
            .send(Event::SessionUpdated(self.session.view().clone()))
            .await;
    }
}
