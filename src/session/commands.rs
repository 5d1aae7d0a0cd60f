use crate::fetch::FetchResult;
use crate::quiz::QuizId;

/// User or worker input handled by [`Session::dispatch`](super::Session::dispatch).
#[derive(Debug)]
pub enum Command {
    /// Validate the identifier and start fetching it.
    SubmitIdentifier(String),
    /// The fetch worker finished a request.
    FetchFinished(FetchResult),
    /// The query field changed; re-run the live search.
    QueryChanged(String),
    /// Move to the next match, searching first if needed.
    FindNext,
    /// Move to the previous match.
    FindPrevious,
    /// Open or close one block.
    ToggleBlock(usize),
    /// Leave the quiz (or abandon the pending fetch) and return to input.
    Back,
}

/// Side effects the shell must carry out after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartFetch { request: u64, id: QuizId },
    CancelFetch,
    ShowError(String),
    /// Bring `block` to the middle of the viewport.
    ScrollTo { block: usize },
}
