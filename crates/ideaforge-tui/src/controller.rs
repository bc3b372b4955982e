//! Generation state for the form controller.
//!
//! Each call to [`GenerationState::begin`] takes a fresh sequence number.
//! A completion carrying anything but the latest number is dropped, so a slow
//! earlier request can never overwrite the results of a later one.

use ideaforge_core::Idea;
use ideaforge_service::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Error(msg) => msg,
        }
    }
}

/// Outcome of one request, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<Vec<Idea>, ServiceError>,
}

/// What the results panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    Generating,
    Cards,
    Empty,
}

/// Notices kept for the session; older ones are dropped first.
pub const NOTICE_HISTORY: usize = 16;

#[derive(Debug, Default)]
pub struct GenerationState {
    loading: bool,
    results: Vec<Idea>,
    notices: Vec<Notice>,
    latest_seq: u64,
}

impl GenerationState {
    /// Start a request: loading on, results cleared.
    pub fn begin(&mut self) -> u64 {
        self.latest_seq += 1;
        self.loading = true;
        self.results.clear();
        self.latest_seq
    }

    /// Apply a completion. Returns `false` when it was superseded and dropped.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.seq != self.latest_seq {
            return false;
        }
        match completion.result {
            Ok(ideas) => {
                let notice = format!("Generated {} project ideas", ideas.len());
                self.results = ideas;
                self.notify(Notice::Success(notice));
            }
            Err(e) => {
                self.results.clear();
                self.notify(Notice::Error(e.user_message().to_string()));
            }
        }
        self.loading = false;
        true
    }

    fn notify(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_HISTORY {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &[Idea] {
        &self.results
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn view(&self) -> ResultsView {
        if !self.results.is_empty() {
            ResultsView::Cards
        } else if self.loading {
            ResultsView::Generating
        } else {
            ResultsView::Empty
        }
    }
}
