use std::fmt;

/// One of N mutually exclusive expandable views.
pub trait Branch: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Stable value written to the external location.
    fn token(self) -> &'static str;

    fn from_token(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|branch| branch.token() == raw)
    }
}

/// Which branch is expanded, if any. There is no state with two branches open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<B> {
    None,
    Active(B),
}

impl<B: Branch> Selection<B> {
    pub fn active(self) -> Option<B> {
        match self {
            Selection::None => None,
            Selection::Active(branch) => Some(branch),
        }
    }

    pub fn token(self) -> Option<&'static str> {
        self.active().map(Branch::token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput<B> {
    Select(B),
    Collapse,
}

/// An accepted edge between two selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<B> {
    pub from: Selection<B>,
    pub to: Selection<B>,
}

impl<B: Branch> Edge<B> {
    pub fn exited(&self) -> Option<B> {
        self.from.active()
    }

    pub fn entered(&self) -> Option<B> {
        self.to.active()
    }

    /// Run teardown for the exited branch, then setup for the entered one.
    pub fn fire<H: TransitionHooks<B>>(&self, hooks: &mut H) {
        if let Some(branch) = self.exited() {
            hooks.on_exit(branch);
        }
        if let Some(branch) = self.entered() {
            hooks.on_enter(branch);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<B> {
    Moved(Edge<B>),
    Ignored,
}

pub trait TransitionHooks<B> {
    fn on_exit(&mut self, branch: B);
    fn on_enter(&mut self, branch: B);
}

/// Pure transition function.
///
/// Selecting only works from `None`; branch-to-branch moves must collapse first.
pub fn transition<B: Branch>(current: Selection<B>, input: SelectionInput<B>) -> Transition<B> {
    match (current, input) {
        (Selection::None, SelectionInput::Select(branch)) => Transition::Moved(Edge {
            from: Selection::None,
            to: Selection::Active(branch),
        }),
        (Selection::Active(branch), SelectionInput::Collapse) => Transition::Moved(Edge {
            from: Selection::Active(branch),
            to: Selection::None,
        }),
        (Selection::Active(_), SelectionInput::Select(_))
        | (Selection::None, SelectionInput::Collapse) => Transition::Ignored,
    }
}

/// Long-lived holder of the current selection.
#[derive(Debug, Clone)]
pub struct BranchMachine<B> {
    state: Selection<B>,
}

impl<B: Branch> BranchMachine<B> {
    pub fn new() -> Self {
        Self {
            state: Selection::None,
        }
    }

    /// Seed from the external location value; anything unrecognised starts collapsed.
    pub fn from_projection(token: Option<&str>) -> Self {
        let state = token
            .and_then(B::from_token)
            .map_or(Selection::None, Selection::Active);
        Self { state }
    }

    pub fn state(&self) -> Selection<B> {
        self.state
    }

    pub fn apply(&mut self, input: SelectionInput<B>) -> Transition<B> {
        let outcome = transition(self.state, input);
        if let Transition::Moved(edge) = outcome {
            self.state = edge.to;
        }
        outcome
    }

    pub fn apply_with<H: TransitionHooks<B>>(
        &mut self,
        input: SelectionInput<B>,
        hooks: &mut H,
    ) -> Transition<B> {
        let outcome = self.apply(input);
        if let Transition::Moved(edge) = outcome {
            edge.fire(hooks);
        }
        outcome
    }
}

impl<B: Branch> Default for BranchMachine<B> {
    fn default() -> Self {
        Self::new()
    }
}
