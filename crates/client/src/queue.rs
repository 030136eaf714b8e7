//! Serialized per-trainee assignment writes.
//!
//! At most one write per trainee is in flight. A write submitted while
//! another one for the same trainee is in flight replaces any queued,
//! not yet sent write for that trainee, so only the latest state reaches
//! the server. Writes for different trainees run concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mdb_core::assignment::TraineeAssignment;
use mdb_core::types::DbId;
use tokio::sync::watch;

use crate::notify::{Notifier, ASSIGNMENT_SAVE_FAILED};
use crate::writer::AssignmentWriter;

/// Queued write of a trainee whose previous write is still in flight.
#[derive(Debug, Default)]
struct Slot {
    pending: Option<TraineeAssignment>,
}

struct Inner {
    writer: Arc<dyn AssignmentWriter>,
    notifier: Arc<dyn Notifier>,
    /// One entry per trainee with a write in flight.
    slots: Mutex<HashMap<DbId, Slot>>,
    /// Number of trainees with a write in flight.
    active: watch::Sender<usize>,
}

/// Handle to the write queue. Cheap to clone.
///
/// Must be used from within a Tokio runtime: submitting spawns the drain
/// task of the trainee.
#[derive(Clone)]
pub struct AssignmentQueue {
    inner: Arc<Inner>,
}

impl AssignmentQueue {
    pub fn new(writer: Arc<dyn AssignmentWriter>, notifier: Arc<dyn Notifier>) -> Self {
        let (active, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                writer,
                notifier,
                slots: Mutex::new(HashMap::new()),
                active,
            }),
        }
    }

    /// Queue a write of `assignment` for `trainee_id`.
    pub fn submit(&self, trainee_id: DbId, assignment: TraineeAssignment) {
        {
            let mut slots = self.inner.slots.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(slot) = slots.get_mut(&trainee_id) {
                if slot.pending.replace(assignment).is_some() {
                    tracing::debug!(trainee_id, "Superseded queued assignment write");
                }
                return;
            }
            slots.insert(trainee_id, Slot::default());
        }

        self.inner.active.send_modify(|n| *n += 1);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.drain(trainee_id, assignment).await;
        });
    }

    /// Number of trainees with a write in flight.
    pub fn in_flight(&self) -> usize {
        *self.inner.active.borrow()
    }

    /// Wait until no write is in flight or queued.
    pub async fn settled(&self) {
        let mut rx = self.inner.active.subscribe();
        // The sender lives as long as `self`, so the channel cannot close.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

impl Inner {
    /// Send `first`, then whatever was queued meanwhile, until the slot is
    /// empty.
    async fn drain(&self, trainee_id: DbId, first: TraineeAssignment) {
        let mut guard = DrainGuard {
            inner: self,
            trainee_id,
            released: false,
        };
        let mut next = first;
        loop {
            match self.writer.write_assignment(trainee_id, next).await {
                Ok(()) => tracing::debug!(trainee_id, "Assignment saved"),
                Err(e) => {
                    tracing::warn!(trainee_id, error = %e, "Assignment write failed");
                    self.notifier.error(ASSIGNMENT_SAVE_FAILED);
                }
            }

            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            match slots.get_mut(&trainee_id).and_then(|slot| slot.pending.take()) {
                Some(pending) => next = pending,
                None => {
                    // Removed under the lock so a concurrent submit either
                    // lands in this slot's pending write or starts a new drain.
                    slots.remove(&trainee_id);
                    guard.released = true;
                    break;
                }
            }
        }
    }
}

/// Frees the trainee's slot and the in-flight count when a drain ends,
/// including when the writer panics and the task unwinds.
struct DrainGuard<'a> {
    inner: &'a Inner,
    trainee_id: DbId,
    /// Set once the slot was removed on the normal path.
    released: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            let dropped = self
                .inner
                .slots
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&self.trainee_id)
                .and_then(|slot| slot.pending);
            tracing::error!(
                trainee_id = self.trainee_id,
                dropped_pending = dropped.is_some(),
                "Assignment write aborted"
            );
            self.inner.notifier.error(ASSIGNMENT_SAVE_FAILED);
        }
        self.inner.active.send_modify(|n| *n -= 1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::error::ClientError;

    /// Writer that records every call and blocks until the test releases it.
    pub(crate) struct GatedWriter {
        pub calls: Mutex<Vec<(DbId, TraineeAssignment)>>,
        pub gate: Semaphore,
        pub fail: bool,
    }

    impl GatedWriter {
        pub fn open() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                fail: false,
            })
        }

        pub fn closed() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                gate: Semaphore::new(0),
                fail: false,
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                fail: true,
            })
        }

        pub fn calls(&self) -> Vec<(DbId, TraineeAssignment)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AssignmentWriter for GatedWriter {
        async fn write_assignment(
            &self,
            trainee_id: DbId,
            assignment: TraineeAssignment,
        ) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push((trainee_id, assignment));
            self.gate.acquire().await.unwrap().forget();
            if self.fail {
                return Err(ClientError::Api {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(())
        }
    }

    /// Writer whose first call panics; later calls succeed and are recorded.
    #[derive(Default)]
    struct PanicOnceWriter {
        panicked: std::sync::atomic::AtomicBool,
        calls: Mutex<Vec<(DbId, TraineeAssignment)>>,
    }

    #[async_trait]
    impl AssignmentWriter for PanicOnceWriter {
        async fn write_assignment(
            &self,
            trainee_id: DbId,
            assignment: TraineeAssignment,
        ) -> Result<(), ClientError> {
            if !self.panicked.swap(true, std::sync::atomic::Ordering::SeqCst) {
                panic!("writer blew up");
            }
            self.calls.lock().unwrap().push((trainee_id, assignment));
            Ok(())
        }
    }

    /// Notifier that records every message.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn department(id: DbId) -> TraineeAssignment {
        TraineeAssignment {
            department_id: Some(id),
            ..Default::default()
        }
    }

    async fn wait_for_calls(writer: &GatedWriter, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while writer.calls().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("writes should start");
    }

    #[tokio::test]
    async fn latest_queued_write_supersedes_earlier_ones() {
        let writer = GatedWriter::closed();
        let queue = AssignmentQueue::new(writer.clone(), Arc::new(RecordingNotifier::default()));

        queue.submit(1, department(10));
        wait_for_calls(&writer, 1).await;
        queue.submit(1, department(11));
        queue.submit(1, department(12));
        assert_eq!(queue.in_flight(), 1);

        writer.gate.add_permits(10);
        queue.settled().await;

        assert_eq!(writer.calls(), vec![(1, department(10)), (1, department(12))]);
        assert_eq!(queue.in_flight(), 0);
    }

    #[tokio::test]
    async fn one_write_in_flight_per_trainee() {
        let writer = GatedWriter::closed();
        let queue = AssignmentQueue::new(writer.clone(), Arc::new(RecordingNotifier::default()));

        queue.submit(1, department(10));
        queue.submit(1, department(11));
        wait_for_calls(&writer, 1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(writer.calls().len(), 1, "second write must wait for the first");

        writer.gate.add_permits(1);
        wait_for_calls(&writer, 2).await;
        writer.gate.add_permits(1);
        queue.settled().await;
    }

    #[tokio::test]
    async fn different_trainees_write_concurrently() {
        let writer = GatedWriter::closed();
        let queue = AssignmentQueue::new(writer.clone(), Arc::new(RecordingNotifier::default()));

        queue.submit(1, department(10));
        queue.submit(2, department(20));
        wait_for_calls(&writer, 2).await;
        assert_eq!(queue.in_flight(), 2);

        writer.gate.add_permits(2);
        queue.settled().await;
    }

    #[tokio::test]
    async fn failed_write_notifies() {
        let writer = GatedWriter::failing();
        let notifier = Arc::new(RecordingNotifier::default());
        let queue = AssignmentQueue::new(writer.clone(), notifier.clone());

        queue.submit(1, department(10));
        queue.settled().await;

        assert_eq!(notifier.messages(), vec![ASSIGNMENT_SAVE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn settled_returns_immediately_when_idle() {
        let queue = AssignmentQueue::new(
            GatedWriter::open(),
            Arc::new(RecordingNotifier::default()),
        );
        tokio::time::timeout(Duration::from_secs(1), queue.settled())
            .await
            .expect("idle queue is settled");
    }

    #[tokio::test]
    async fn panicking_writer_releases_the_trainee() {
        let writer = Arc::new(PanicOnceWriter::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let queue = AssignmentQueue::new(writer.clone(), notifier.clone());

        queue.submit(1, department(10));
        tokio::time::timeout(Duration::from_secs(5), queue.settled())
            .await
            .expect("queue settles after a panicking write");
        assert_eq!(queue.in_flight(), 0);
        assert_eq!(notifier.messages(), vec![ASSIGNMENT_SAVE_FAILED.to_string()]);

        queue.submit(1, department(11));
        tokio::time::timeout(Duration::from_secs(5), queue.settled())
            .await
            .expect("later writes still run");
        assert_eq!(*writer.calls.lock().unwrap(), vec![(1, department(11))]);
    }
}
