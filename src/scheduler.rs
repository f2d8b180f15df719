//! Frame request bookkeeping
//!
//! Each frame request carries a token. Only the most recently scheduled
//! token is honored, so cancelling and rescheduling (on reset) can never
//! leave two loop chains running even if a platform fails to cancel.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifies one frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Platform hook that calls back with the token on the next display refresh
pub trait FrameScheduler {
    fn request(&mut self, token: FrameToken);
    fn cancel(&mut self, token: FrameToken);
}

/// Tracks the single outstanding frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameToken>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Request the next frame, replacing any outstanding request
    pub fn schedule(&mut self, scheduler: &mut dyn FrameScheduler) -> FrameToken {
        self.cancel(scheduler);
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        scheduler.request(token);
        token
    }

    /// Cancel the outstanding request, if any
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) -> Option<FrameToken> {
        let token = self.pending.take()?;
        scheduler.cancel(token);
        Some(token)
    }

    /// Claim a fired frame. Returns false for stale or unknown tokens.
    pub fn accept(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Default)]
struct ManualQueue {
    requested: VecDeque<FrameToken>,
    cancelled: Vec<FrameToken>,
}

/// Scheduler driven by hand: the headless runner and tests pull tokens
/// with `take_next` and feed them back to the game.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest outstanding request
    pub fn take_next(&self) -> Option<FrameToken> {
        self.queue.borrow_mut().requested.pop_front()
    }

    pub fn outstanding(&self) -> usize {
        self.queue.borrow().requested.len()
    }

    pub fn cancelled(&self) -> Vec<FrameToken> {
        self.queue.borrow().cancelled.clone()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self, token: FrameToken) {
        self.queue.borrow_mut().requested.push_back(token);
    }

    fn cancel(&mut self, token: FrameToken) {
        let mut queue = self.queue.borrow_mut();
        queue.requested.retain(|t| *t != token);
        queue.cancelled.push(token);
    }
}
