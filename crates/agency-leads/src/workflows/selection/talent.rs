use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::machine::{Branch, BranchMachine, Edge, Selection, SelectionInput, Transition};
use super::projection::LocationSlot;

/// The two talent categories a visitor can expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentBranch {
    Performers,
    Speakers,
}

impl Branch for TalentBranch {
    const ALL: &'static [Self] = &[TalentBranch::Performers, TalentBranch::Speakers];

    fn token(self) -> &'static str {
        match self {
            TalentBranch::Performers => "performers",
            TalentBranch::Speakers => "speakers",
        }
    }
}

/// Entry/exit choreography owned by the view layer.
#[async_trait]
pub trait ViewEffects<B>: Send + Sync {
    async fn teardown(&self, branch: B);
    async fn setup(&self, branch: B);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange<B> {
    Applied(Edge<B>),
    /// The machine rejected the input (e.g. branch-to-branch without collapsing).
    Ignored,
    /// Another transition's hooks were still running.
    Busy,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps which category is expanded, runs view hooks, and mirrors the state into the
/// location slot once each transition settles.
pub struct TalentSelectionController<L, E, B = TalentBranch> {
    machine: Mutex<BranchMachine<B>>,
    in_flight: AtomicBool,
    slot: Arc<L>,
    effects: Arc<E>,
}

impl<L, E, B> TalentSelectionController<L, E, B>
where
    L: LocationSlot,
    E: ViewEffects<B>,
    B: Branch,
{
    /// Reads the slot once; it is not consulted again as a source of truth.
    pub fn new(slot: Arc<L>, effects: Arc<E>) -> Self {
        let machine = BranchMachine::from_projection(slot.read().as_deref());
        Self {
            machine: Mutex::new(machine),
            in_flight: AtomicBool::new(false),
            slot,
            effects,
        }
    }

    pub fn selection(&self) -> Selection<B> {
        self.machine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn select(&self, branch: B) -> SelectionChange<B> {
        self.drive(SelectionInput::Select(branch)).await
    }

    pub async fn collapse(&self) -> SelectionChange<B> {
        self.drive(SelectionInput::Collapse).await
    }

    /// Click handler: collapses the open branch, or opens `branch` when nothing is open.
    pub async fn toggle(&self, branch: B) -> SelectionChange<B> {
        if self.selection() == Selection::Active(branch) {
            self.collapse().await
        } else {
            self.select(branch).await
        }
    }

    async fn drive(&self, input: SelectionInput<B>) -> SelectionChange<B> {
        let Some(_flight) = InFlight::acquire(&self.in_flight) else {
            debug!(?input, "selection input dropped while transition in flight");
            return SelectionChange::Busy;
        };

        let outcome = self
            .machine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(input);

        let edge = match outcome {
            Transition::Moved(edge) => edge,
            Transition::Ignored => {
                debug!(?input, "selection input ignored");
                return SelectionChange::Ignored;
            }
        };

        if let Some(branch) = edge.exited() {
            self.effects.teardown(branch).await;
        }
        if let Some(branch) = edge.entered() {
            self.effects.setup(branch).await;
        }

        self.slot.write(edge.to.token());
        debug!(from = ?edge.from, to = ?edge.to, "selection transition settled");
        SelectionChange::Applied(edge)
    }
}
