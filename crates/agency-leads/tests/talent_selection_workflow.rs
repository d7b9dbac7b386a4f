//! Talent selection driven through a URL query parameter, as a shared link would.

use std::sync::{Arc, Mutex};

use agency_leads::workflows::selection::{
    LocationSlot, Selection, SelectionChange, TalentBranch, TalentSelectionController,
    UrlQuerySlot, ViewEffects,
};
use async_trait::async_trait;
use url::Url;

#[derive(Default)]
struct ViewLog(Mutex<Vec<String>>);

impl ViewLog {
    fn entries(&self) -> Vec<String> {
        self.0.lock().expect("view log mutex").clone()
    }
}

#[async_trait]
impl ViewEffects<TalentBranch> for ViewLog {
    async fn teardown(&self, branch: TalentBranch) {
        tokio::task::yield_now().await;
        self.0
            .lock()
            .expect("view log mutex")
            .push(format!("hide {branch:?}"));
    }

    async fn setup(&self, branch: TalentBranch) {
        tokio::task::yield_now().await;
        self.0
            .lock()
            .expect("view log mutex")
            .push(format!("show {branch:?}"));
    }
}

fn controller(
    link: &str,
) -> (
    TalentSelectionController<UrlQuerySlot, ViewLog>,
    Arc<UrlQuerySlot>,
    Arc<ViewLog>,
) {
    let slot = Arc::new(UrlQuerySlot::new(
        Url::parse(link).expect("valid link"),
        "category",
    ));
    let view = Arc::new(ViewLog::default());
    (
        TalentSelectionController::new(slot.clone(), view.clone()),
        slot,
        view,
    )
}

#[tokio::test]
async fn unrecognised_link_value_opens_nothing() {
    let (controller, slot, view) = controller("https://agency.example/talent?category=magicians");

    assert_eq!(controller.selection(), Selection::None);
    assert!(!controller.is_transitioning());
    assert!(view.entries().is_empty());
    assert_eq!(slot.read().as_deref(), Some("magicians"));
}

#[tokio::test]
async fn shared_link_restores_the_open_branch() {
    let (controller, _slot, _view) =
        controller("https://agency.example/talent?lang=he&category=speakers");

    assert_eq!(
        controller.selection(),
        Selection::Active(TalentBranch::Speakers)
    );
}

#[tokio::test]
async fn switching_branches_collapses_first_and_updates_the_link() {
    let (controller, slot, view) = controller("https://agency.example/talent?lang=he");

    controller.select(TalentBranch::Performers).await;
    assert_eq!(
        slot.location().as_str(),
        "https://agency.example/talent?lang=he&category=performers"
    );

    assert_eq!(
        controller.select(TalentBranch::Speakers).await,
        SelectionChange::Ignored
    );
    assert_eq!(
        controller.selection(),
        Selection::Active(TalentBranch::Performers)
    );

    controller.toggle(TalentBranch::Performers).await;
    assert_eq!(slot.location().as_str(), "https://agency.example/talent?lang=he");

    controller.toggle(TalentBranch::Speakers).await;
    assert_eq!(
        slot.location().as_str(),
        "https://agency.example/talent?lang=he&category=speakers"
    );
    assert_eq!(
        view.entries(),
        vec!["show Performers", "hide Performers", "show Speakers"]
    );
}
