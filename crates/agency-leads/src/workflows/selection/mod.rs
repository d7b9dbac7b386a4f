//! Exclusive branch selection for the talent category view.

pub mod machine;
pub mod projection;
pub mod talent;

pub use machine::{
    transition, Branch, BranchMachine, Edge, Selection, SelectionInput, Transition,
    TransitionHooks,
};
pub use projection::{LocationSlot, UrlQuerySlot};
pub use talent::{SelectionChange, TalentBranch, TalentSelectionController, ViewEffects};
