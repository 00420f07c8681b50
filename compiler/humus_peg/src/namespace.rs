//! Named rules, forward references and semantic transforms.
//!
//! A [`Namespace`] goes through two phases. While it is open, rules may be
//! looked up before they exist, defined in any order and given transforms.
//! The first match request reaching any of its rules seals it; from then on
//! `define` and `transform` are rejected with [`GrammarError::Sealed`].
//!
//! ```text
//! let mut ns = Namespace::new();
//! ns.define("list", sequence([terminal('['), ns.lookup("items"), terminal(']')]))?;
//! ns.define("items", zero_or_more(ns.lookup("list")))?;
//! ```
//!
//! The namespace owns its rules. Patterns returned by [`Namespace::lookup`]
//! hold weak references, so recursive grammars form no reference cycles;
//! keep the namespace alive for as long as its patterns are matched.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::actor::{Actor, EventLoop};
use crate::combinator::{Combinator, Pattern};
use crate::cursor::Span;
use crate::error::{GrammarError, TransformError};
use crate::protocol::{Failure, Request, Success};
use crate::value::MatchValue;

/// Rewrites the raw value of a successful rule match.
///
/// Receives the rule name, the raw value and the consumed span.
pub type TransformFn<V> = dyn Fn(&str, V, &Span) -> Result<V, TransformError>;

struct RuleSlot<V: 'static> {
    name: Rc<str>,
    body: OnceCell<Pattern<V>>,
    transform: RefCell<Option<Rc<TransformFn<V>>>>,
    sealed: Rc<Cell<bool>>,
}

/// Reference from a pattern to a namespace rule, resolved at match time.
pub struct RuleRef<V: 'static> {
    name: Rc<str>,
    slot: Weak<RuleSlot<V>>,
}

impl<V: 'static> RuleRef<V> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<V: MatchValue> RuleRef<V> {
    pub(crate) fn dispatch(&self, sponsor: &mut EventLoop, request: Request<V>) {
        let Some(slot) = self.slot.upgrade() else {
            sponsor.halt(GrammarError::Detached(self.name.to_string()));
            return;
        };
        slot.sealed.set(true);
        let Some(body) = slot.body.get() else {
            sponsor.halt(GrammarError::Undefined(self.name.to_string()));
            return;
        };
        trace!(rule = %self.name, at = %request.input.position(), "match");

        let Request { input, ok, fail } = request;
        let name = Rc::clone(&self.name);
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, failure: Failure<V>| {
            trace!(rule = %name, furthest = %failure.furthest.position(), "fail");
            sponsor.send(&fail, failure.relabel(&name));
        });
        let ok = match slot.transform.borrow().clone() {
            None => ok,
            Some(transform) => {
                let name = Rc::clone(&self.name);
                Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
                    let span = success.span();
                    let Success { start, end, value } = success;
                    match transform(&name, value, &span) {
                        Ok(value) => sponsor.send(&ok, Success { start, end, value }),
                        Err(source) => sponsor.halt(GrammarError::Transform {
                            rule: name.to_string(),
                            source,
                        }),
                    }
                })
            }
        };
        body.send(sponsor, Request::new(input, ok, fail));
    }
}

/// Registry of named rules.
pub struct Namespace<V: 'static> {
    rules: RefCell<FxHashMap<Rc<str>, Rc<RuleSlot<V>>>>,
    sealed: Rc<Cell<bool>>,
}

impl<V: MatchValue> Namespace<V> {
    pub fn new() -> Self {
        Namespace {
            rules: RefCell::new(FxHashMap::default()),
            sealed: Rc::new(Cell::new(false)),
        }
    }

    fn slot(&self, name: &str) -> Rc<RuleSlot<V>> {
        let mut rules = self.rules.borrow_mut();
        if let Some(slot) = rules.get(name) {
            return Rc::clone(slot);
        }
        let name: Rc<str> = Rc::from(name);
        let slot = Rc::new(RuleSlot {
            name: Rc::clone(&name),
            body: OnceCell::new(),
            transform: RefCell::new(None),
            sealed: Rc::clone(&self.sealed),
        });
        rules.insert(name, Rc::clone(&slot));
        slot
    }

    fn check_open(&self, name: &str, action: &'static str) -> Result<(), GrammarError> {
        if self.sealed.get() {
            return Err(GrammarError::Sealed {
                name: name.to_owned(),
                action,
            });
        }
        Ok(())
    }

    /// Pattern that matches the rule `name`, whether or not it has been
    /// defined yet.
    pub fn lookup(&self, name: &str) -> Pattern<V> {
        let slot = self.slot(name);
        Pattern::new(Combinator::Rule(RuleRef {
            name: Rc::clone(&slot.name),
            slot: Rc::downgrade(&slot),
        }))
    }

    /// Alias of [`lookup`](Self::lookup) that reads better inside grammar
    /// tables.
    pub fn call(&self, name: &str) -> Pattern<V> {
        self.lookup(name)
    }

    /// Give the rule `name` its body. Returns a pattern referencing the rule.
    pub fn define(&mut self, name: &str, body: Pattern<V>) -> Result<Pattern<V>, GrammarError> {
        self.check_open(name, "define")?;
        let slot = self.slot(name);
        if slot.body.set(body).is_err() {
            return Err(GrammarError::Redefined(name.to_owned()));
        }
        trace!(rule = name, "defined");
        Ok(self.lookup(name))
    }

    /// Attach `transform` to the rule `name`, replacing any earlier one.
    ///
    /// The rule need not be defined yet.
    pub fn transform<F>(&mut self, name: &str, transform: F) -> Result<(), GrammarError>
    where
        F: Fn(&str, V, &Span) -> Result<V, TransformError> + 'static,
    {
        self.check_open(name, "transform")?;
        let slot = self.slot(name);
        *slot.transform.borrow_mut() = Some(Rc::new(transform));
        Ok(())
    }

    /// End the definition phase, reporting rules that were referenced but
    /// never defined. The namespace stays sealed even when this fails.
    pub fn seal(&self) -> Result<(), GrammarError> {
        self.sealed.set(true);
        let rules = self.rules.borrow();
        let mut missing: Vec<String> = rules
            .values()
            .filter(|slot| slot.body.get().is_none())
            .map(|slot| slot.name.to_string())
            .collect();
        debug!(rules = rules.len(), unresolved = missing.len(), "namespace sealed");
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        Err(GrammarError::Unresolved(missing))
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.get()
    }

    /// Returns `true` if `name` has a body.
    pub fn contains(&self, name: &str) -> bool {
        self.rules
            .borrow()
            .get(name)
            .is_some_and(|slot| slot.body.get().is_some())
    }

    /// Names of all defined rules, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rules
            .borrow()
            .values()
            .filter(|slot| slot.body.get().is_some())
            .map(|slot| slot.name.to_string())
            .collect();
        names.sort_unstable();
        names
    }
}

impl<V: MatchValue> Default for Namespace<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> fmt::Debug for Namespace<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("rules", &self.rules.borrow().len())
            .field("sealed", &self.sealed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests;
