//! Single-threaded actor runtime.
//!
//! Every combinator, named rule, input stream and continuation in this crate
//! is an [`Actor`]. Sending a message never runs the receiver: it queues a
//! delivery on the [`EventLoop`], which dispatches deliveries one at a time in
//! FIFO order. A deeply nested or highly repetitive grammar therefore grows
//! the queue, not the native call stack.
//!
//! # Halting
//!
//! Configuration faults discovered while matching (a rule that was never
//! defined, a transform that rejects its input) are not match failures. The
//! actor that notices calls [`EventLoop::halt`], which discards every pending
//! delivery; [`EventLoop::run`] then reports the fault as a [`RunError`].

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{GrammarError, RunError};

/// The script an actor follows when a message arrives.
pub trait Behavior<M>: 'static {
    /// Handle one message. Further messages go out through `sponsor`.
    fn receive(&self, sponsor: &mut EventLoop, message: M);
}

/// Adapter giving closures a [`Behavior`].
struct FnBehavior<F>(F);

impl<M, F> Behavior<M> for FnBehavior<F>
where
    F: Fn(&mut EventLoop, M) + 'static,
{
    fn receive(&self, sponsor: &mut EventLoop, message: M) {
        (self.0)(sponsor, message);
    }
}

/// Address of an actor accepting messages of type `M`.
///
/// Cloning an address is cheap and every clone reaches the same behavior.
pub struct Actor<M: 'static> {
    behavior: Rc<dyn Behavior<M>>,
}

impl<M: 'static> Actor<M> {
    /// Create an actor from a behavior value.
    pub fn new<B: Behavior<M>>(behavior: B) -> Self {
        Actor {
            behavior: Rc::new(behavior),
        }
    }

    /// Create an actor from an already shared behavior.
    pub fn from_rc(behavior: Rc<dyn Behavior<M>>) -> Self {
        Actor { behavior }
    }

    /// Create an actor whose behavior is a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut EventLoop, M) + 'static,
    {
        Self::new(FnBehavior(f))
    }
}

impl<M: 'static> Clone for Actor<M> {
    fn clone(&self) -> Self {
        Actor {
            behavior: Rc::clone(&self.behavior),
        }
    }
}

impl<M: 'static> fmt::Debug for Actor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor({:p})", Rc::as_ptr(&self.behavior).cast::<()>())
    }
}

type Delivery = Box<dyn FnOnce(&mut EventLoop)>;

/// Tuning knobs for an [`EventLoop`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLoopConfig {
    /// Maximum number of deliveries a single [`EventLoop::run`] may dispatch.
    /// `None` means unlimited.
    pub dispatch_limit: Option<u64>,
}

impl EventLoopConfig {
    /// Limit the number of deliveries per run.
    #[must_use]
    pub fn with_dispatch_limit(mut self, limit: u64) -> Self {
        self.dispatch_limit = Some(limit);
        self
    }
}

/// Summary of one [`EventLoop::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Deliveries dispatched during the run.
    pub dispatched: u64,
}

/// FIFO message dispatcher driving every actor in a parse.
pub struct EventLoop {
    queue: VecDeque<Delivery>,
    config: EventLoopConfig,
    dispatched: u64,
    halted: Option<GrammarError>,
}

impl EventLoop {
    /// Create an event loop with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EventLoopConfig::default())
    }

    /// Create an event loop with an explicit configuration.
    pub fn with_config(config: EventLoopConfig) -> Self {
        EventLoop {
            queue: VecDeque::new(),
            config,
            dispatched: 0,
            halted: None,
        }
    }

    /// Queue `message` for delivery to `target`.
    ///
    /// Messages sent after a halt are dropped.
    pub fn send<M: 'static>(&mut self, target: &Actor<M>, message: M) {
        if self.halted.is_some() {
            return;
        }
        let behavior = Rc::clone(&target.behavior);
        self.queue
            .push_back(Box::new(move |sponsor| behavior.receive(sponsor, message)));
    }

    /// Stop the loop because of a configuration fault.
    ///
    /// Only the first fault is kept; pending deliveries are discarded.
    pub fn halt(&mut self, error: GrammarError) {
        if self.halted.is_none() {
            debug!(%error, pending = self.queue.len(), "event loop halted");
            self.halted = Some(error);
        }
        self.queue.clear();
    }

    /// Returns `true` once [`halt`](Self::halt) has been called and the
    /// fault has not yet been reported by [`run`](Self::run).
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Number of deliveries waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total deliveries dispatched over the lifetime of this loop.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch a single delivery. Returns `false` when the queue is empty.
    pub fn step(&mut self) -> bool {
        match self.queue.pop_front() {
            Some(delivery) => {
                self.dispatched += 1;
                delivery(self);
                true
            }
            None => false,
        }
    }

    /// Dispatch until the queue drains, the loop halts, or the dispatch
    /// limit is reached.
    pub fn run(&mut self) -> Result<RunStats, RunError> {
        let first = self.dispatched;
        loop {
            if let Some(error) = self.halted.take() {
                return Err(RunError::Grammar(error));
            }
            if let Some(limit) = self.config.dispatch_limit {
                if self.dispatched - first >= limit && !self.queue.is_empty() {
                    self.queue.clear();
                    return Err(RunError::DispatchLimit { limit });
                }
            }
            if !self.step() {
                break;
            }
        }
        let stats = RunStats {
            dispatched: self.dispatched - first,
        };
        debug!(dispatched = stats.dispatched, "event loop idle");
        Ok(stats)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.queue.len())
            .field("dispatched", &self.dispatched)
            .field("halted", &self.halted)
            .field("config", &self.config)
            .finish()
    }
}
