use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use log::{debug, error};

use super::{CancelToken, FetchError, Fetcher, QuizSource};
use crate::quiz::{Quiz, QuizId};

/// Commands understood by the background fetch worker.
#[derive(Debug)]
pub enum FetchCommand {
    /// Fetch a quiz, tagging the result with `request`.
    Load {
        request: u64,
        id: QuizId,
        token: CancelToken,
    },
    /// Stop the background worker thread.
    Shutdown,
}

/// Outcome of one [`FetchCommand::Load`].
#[derive(Debug)]
pub struct FetchResult {
    pub request: u64,
    pub outcome: Result<Arc<Quiz>, FetchError>,
}

/// UI-side handle to the fetch worker.
///
/// Starting a request cancels the previous one and records the new request
/// id as the latest, so the worker skips anything queued behind it.
pub struct FetchHandle {
    tx: Sender<FetchCommand>,
    rx: Receiver<FetchResult>,
    /// Reports requests the worker never received.
    results: Sender<FetchResult>,
    latest_request: Arc<AtomicU64>,
    current: Option<CancelToken>,
}

/// Launch the worker thread that owns `fetcher`.
pub fn spawn<S>(fetcher: Fetcher<S>) -> FetchHandle
where
    S: QuizSource + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let latest_request = Arc::new(AtomicU64::new(0));
    let thread_latest = Arc::clone(&latest_request);

    let results = result_tx.clone();
    thread::spawn(move || worker_loop(fetcher, command_rx, result_tx, thread_latest));

    FetchHandle {
        tx: command_tx,
        rx: result_rx,
        results,
        latest_request,
        current: None,
    }
}

fn worker_loop<S: QuizSource>(
    mut fetcher: Fetcher<S>,
    command_rx: Receiver<FetchCommand>,
    result_tx: Sender<FetchResult>,
    latest_request: Arc<AtomicU64>,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(&mut fetcher, &result_tx, &latest_request, command) {
            break;
        }
    }
}

fn handle_command<S: QuizSource>(
    fetcher: &mut Fetcher<S>,
    result_tx: &Sender<FetchResult>,
    latest_request: &AtomicU64,
    command: FetchCommand,
) -> bool {
    match command {
        FetchCommand::Load { request, id, token } => {
            let outcome = if request < latest_request.load(Ordering::Acquire) {
                debug!("skipping superseded request {request}");
                Err(FetchError::Cancelled)
            } else {
                fetcher.fetch(&id, &token)
            };
            result_tx.send(FetchResult { request, outcome }).is_ok()
        }
        FetchCommand::Shutdown => false,
    }
}

impl FetchHandle {
    /// Queue a fetch for `id`, cancelling whatever was in flight.
    pub fn start(&mut self, request: u64, id: QuizId) {
        self.cancel();
        let token = CancelToken::new();
        self.current = Some(token.clone());
        self.latest_request.store(request, Ordering::Release);
        if self.tx.send(FetchCommand::Load { request, id, token }).is_err() {
            error!("fetch worker stopped; request {request} dropped");
            let _ = self.results.send(FetchResult {
                request,
                outcome: Err(FetchError::transport("fetch worker stopped")),
            });
        }
    }

    /// Cancel the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    pub fn try_recv(&self) -> Result<FetchResult, TryRecvError> {
        self.rx.try_recv()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<FetchResult, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn shutdown(&mut self) {
        self.cancel();
        let _ = self.tx.send(FetchCommand::Shutdown);
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::fetch::RetryPolicy;
    use crate::fetch::fetcher::tests::{ScriptedSource, arithmetic_quiz};

    fn id() -> QuizId {
        QuizId::parse("123e4567-e89b-12d3-a456-426614174000").expect("valid id")
    }

    #[test]
    fn results_carry_their_request_id() {
        let source = ScriptedSource::new(vec![Ok(arithmetic_quiz())]);
        let fetcher = Fetcher::new(source, RetryPolicy::new(1, Duration::ZERO));
        let mut handle = spawn(fetcher);

        handle.start(7, id());
        let result = handle
            .recv_timeout(Duration::from_secs(5))
            .expect("fetch result");
        assert_eq!(result.request, 7);
        assert_eq!(
            result.outcome.expect("quiz").display_title(),
            "Arithmetic"
        );
    }

    #[test]
    fn superseded_request_is_cancelled() {
        let source = ScriptedSource::new(vec![
            Err(FetchError::transport("slow network")),
            Ok(arithmetic_quiz()),
        ]);
        let fetcher = Fetcher::new(source, RetryPolicy::new(3, Duration::from_secs(30)));
        let mut handle = spawn(fetcher);

        handle.start(1, id());
        thread::sleep(Duration::from_millis(200));
        handle.start(2, id());

        let first = handle
            .recv_timeout(Duration::from_secs(5))
            .expect("first result");
        assert_eq!(first.request, 1);
        assert_eq!(first.outcome, Err(FetchError::Cancelled));

        let second = handle
            .recv_timeout(Duration::from_secs(5))
            .expect("second result");
        assert_eq!(second.request, 2);
        assert!(second.outcome.is_ok());
    }

    #[test]
    fn dead_worker_reports_a_failed_result() {
        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        drop(command_rx);
        let mut handle = FetchHandle {
            tx: command_tx,
            rx: result_rx,
            results: result_tx,
            latest_request: Arc::new(AtomicU64::new(0)),
            current: None,
        };

        handle.start(3, id());
        let result = handle.try_recv().expect("failed result");
        assert_eq!(result.request, 3);
        assert!(matches!(result.outcome, Err(FetchError::Transport(_))));
    }

    #[test]
    fn queued_stale_request_is_skipped() {
        let mut fetcher = Fetcher::new(
            ScriptedSource::new(vec![Ok(arithmetic_quiz())]),
            RetryPolicy::default(),
        );
        let (result_tx, result_rx) = mpsc::channel();
        let latest = AtomicU64::new(5);

        let keep_going = handle_command(
            &mut fetcher,
            &result_tx,
            &latest,
            FetchCommand::Load {
                request: 4,
                id: id(),
                token: CancelToken::new(),
            },
        );
        assert!(keep_going);
        let result = result_rx.try_recv().expect("result");
        assert_eq!(result.outcome, Err(FetchError::Cancelled));
    }
}
