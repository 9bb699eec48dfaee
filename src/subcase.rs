//! Subcase identity and the tree-walking state machine.
//!
//! A test body may declare nested subcase blocks. The engine runs the body
//! repeatedly (see [`crate::runner`]); across those replays this module's
//! [`WalkerState`] tracks which subcase paths have been fully explored and,
//! within one replay, which path is currently active. Together the two sets
//! of bookkeeping guarantee that every leaf path executes exactly once and
//! that each replay descends into at most one new branch per nesting level.
//!
//! Walker Invariant: a path inserted into the explored set is never entered
//! again, and a replay that enters zero subcases means the whole tree is
//! exhausted.

use std::collections::HashSet;

/// Identity of one subcase declaration site: (name, file, line).
///
/// Compared by identity only. Two sibling declarations with an identical
/// signature (e.g. produced by a loop) are conflated into a single node; test
/// bodies are expected not to do that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubcaseSignature {
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
}

/// The chain of subcases entered during one replay, root to active leaf.
pub type SubcasePath = Vec<SubcaseSignature>;

/// State carried across replays of a single test body.
///
/// `explored` persists for the whole exploration of one test case; the other
/// fields are reset by [`WalkerState::begin_replay`]. `pending[d]` records
/// that, while executing at nesting depth `d`, some subcase with unexplored
/// content was skipped - the enclosing path must then not be marked explored
/// when it is left.
#[derive(Debug, Default)]
pub struct WalkerState {
    explored: HashSet<SubcasePath>,
    path: SubcasePath,
    levels_entered: HashSet<usize>,
    pending: Vec<bool>,
    entered_this_replay: usize,
}

impl WalkerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets per-replay bookkeeping. Called once before each replay.
    pub fn begin_replay(&mut self) {
        self.path.clear();
        self.levels_entered.clear();
        self.pending.clear();
        self.pending.push(false);
        self.entered_this_replay = 0;
    }

    /// Decides whether the subcase identified by `sig` is entered.
    ///
    /// Returns false without side effects when the candidate path has already
    /// been fully explored by a prior replay. Returns false and schedules
    /// another replay when a sibling at the same level was already entered
    /// during this replay. Otherwise enters: the signature joins the current
    /// path and the level is claimed for the rest of this replay.
    pub fn try_enter(&mut self, sig: SubcaseSignature) -> bool {
        let depth = self.path.len();

        let mut candidate = self.path.clone();
        candidate.push(sig);
        if self.explored.contains(&candidate) {
            return false;
        }

        if self.levels_entered.contains(&depth) {
            self.pending[depth] = true;
            return false;
        }

        self.levels_entered.insert(depth);
        self.path = candidate;
        self.entered_this_replay += 1;
        if self.pending.len() <= depth + 1 {
            self.pending.resize(depth + 2, false);
        }
        self.pending[depth + 1] = false;
        true
    }

    /// Leaves the most recently entered subcase.
    ///
    /// If its body skipped nothing unexplored, the current path is complete -
    /// either a leaf or an internal node whose children are all explored -
    /// and is recorded so later replays pass it by. Otherwise the parent
    /// level inherits the pending mark. Must be called exactly once per
    /// successful [`WalkerState::try_enter`], including during unwinding.
    pub fn leave(&mut self) {
        let depth = self.path.len();
        debug_assert!(depth >= 1, "leave without matching enter");
        if !self.pending[depth] {
            self.explored.insert(self.path.clone());
        } else {
            self.pending[depth - 1] = true;
        }
        self.path.pop();
    }

    /// Number of subcases entered during the current replay.
    pub fn entered_this_replay(&self) -> usize {
        self.entered_this_replay
    }

    /// The chain of subcases currently entered, outermost first.
    pub fn path(&self) -> &[SubcaseSignature] {
        &self.path
    }

    #[cfg(test)]
    fn is_explored(&self, path: &[SubcaseSignature]) -> bool {
        self.explored.contains(path)
    }
}
