//! Keeps the menus in step with the persisted session.
//!
//! Every anchor that reacts to login state carries a `data-nav-role`
//! attribute (`profile` or `auth`). The synchronizer walks the known menu
//! containers once per page load and rewrites those anchors; it never looks at
//! link text or targets to decide what an anchor is.

use std::rc::Rc;

use shared::{SessionRecord, SessionRepository};
use tracing::{debug, warn};

pub const NAV_ROLE_ATTRIBUTE: &str = "data-nav-role";
pub const NAV_CONTAINER_IDS: [&str; 3] = ["main-nav", "slide-menu", "fullpage-menu"];
pub const CALL_TO_ACTION_ID: &str = "get-started-btn";

pub const PROFILE_LABEL: &str = "Profile";
pub const LOGIN_LABEL: &str = "Login";
pub const LOGOUT_LABEL: &str = "Logout";
pub const DASHBOARD_LABEL: &str = "Go to Dashboard";
/// Target of the logout anchor; the click handler does the work.
pub const NO_OP_HREF: &str = "#";

/// Pages the navigation can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    Profile,
    SellerProfile,
}

impl Destination {
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Home => "home.html",
            Self::Login => "login.html",
            Self::Profile => "profile.html",
            Self::SellerProfile => "seller-profile.html",
        }
    }

    /// The profile page matching the account kind of `record`.
    #[must_use]
    pub fn profile_for(record: &SessionRecord) -> Self {
        if record.is_seller() {
            Self::SellerProfile
        } else {
            Self::Profile
        }
    }
}

/// What an anchor represents, read from its `data-nav-role` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRole {
    Profile,
    Auth,
}

impl NavRole {
    /// Parses an attribute value; unknown roles are left alone by the synchronizer.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "profile" => Some(Self::Profile),
            "auth" => Some(Self::Auth),
            _ => None,
        }
    }
}

/// Behaviour bound to a click on a navigation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Clear the session, then go home.
    Logout,
    Navigate(Destination),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerChange {
    /// Leave whatever handler the element has.
    Keep,
    /// Replace any existing handler with this action.
    Install(ClickAction),
    Remove,
}

/// Desired state of one role-tagged anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    pub href: String,
    pub label: String,
    pub handler: HandlerChange,
}

/// Computes how an anchor with `role` should look for the given session.
#[must_use]
pub fn link_state(role: NavRole, session: Option<&SessionRecord>) -> LinkState {
    match (role, session) {
        (NavRole::Profile, Some(record)) => LinkState {
            href: Destination::profile_for(record).href().to_string(),
            label: record.name.clone(),
            handler: HandlerChange::Keep,
        },
        (NavRole::Profile, None) => LinkState {
            href: Destination::Profile.href().to_string(),
            label: PROFILE_LABEL.to_string(),
            handler: HandlerChange::Keep,
        },
        (NavRole::Auth, Some(_)) => LinkState {
            href: NO_OP_HREF.to_string(),
            label: LOGOUT_LABEL.to_string(),
            handler: HandlerChange::Install(ClickAction::Logout),
        },
        (NavRole::Auth, None) => LinkState {
            href: Destination::Login.href().to_string(),
            label: LOGIN_LABEL.to_string(),
            handler: HandlerChange::Remove,
        },
    }
}

pub type ClickHandler = Rc<dyn Fn()>;

/// A role-tagged anchor inside a navigation container.
pub trait NavAnchor {
    fn role(&self) -> Option<NavRole>;
    fn set_href(&self, href: &str);
    fn set_label(&self, label: &str);
    /// Replaces the current click handler; `None` removes it.
    fn set_click_handler(&self, handler: Option<ClickHandler>);
}

/// The call-to-action element.
pub trait NavButton {
    fn set_label(&self, label: &str);
    fn set_click_handler(&self, handler: ClickHandler);
}

/// Page access needed by the synchronizer. Missing elements are `None`.
pub trait NavDocument {
    type Anchor: NavAnchor;
    type Button: NavButton;

    /// Anchors inside the container with `id`, or `None` when the container is absent.
    fn anchors_in(&self, container_id: &str) -> Option<Vec<Self::Anchor>>;

    fn button_by_id(&self, id: &str) -> Option<Self::Button>;
}

/// Performs page navigation.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&self, destination: Destination);
}

/// Reconciles navigation elements with the current session.
pub struct NavigationSynchronizer<S, N> {
    session: Rc<S>,
    navigator: Rc<N>,
}

impl<S, N> std::fmt::Debug for NavigationSynchronizer<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationSynchronizer").finish_non_exhaustive()
    }
}

impl<S, N> NavigationSynchronizer<S, N>
where
    S: SessionRepository + 'static,
    N: Navigator + 'static,
{
    pub fn new(session: Rc<S>, navigator: Rc<N>) -> Self {
        Self { session, navigator }
    }

    /// Rewrites every role-tagged anchor and the call-to-action once.
    ///
    /// Absent containers, anchors without a known role and a missing
    /// call-to-action are skipped.
    pub fn sync<D: NavDocument>(&self, document: &D) {
        let session = self.session.current_user();
        debug!(logged_in = session.is_some(), "synchronizing navigation");

        for container_id in NAV_CONTAINER_IDS {
            let Some(anchors) = document.anchors_in(container_id) else {
                continue;
            };
            for anchor in anchors {
                let Some(role) = anchor.role() else {
                    continue;
                };
                self.apply(&anchor, &link_state(role, session.as_ref()));
            }
        }

        if let (Some(record), Some(button)) =
            (session.as_ref(), document.button_by_id(CALL_TO_ACTION_ID))
        {
            button.set_label(DASHBOARD_LABEL);
            button.set_click_handler(
                self.handler_for(ClickAction::Navigate(Destination::profile_for(record))),
            );
        }
    }

    fn apply<A: NavAnchor>(&self, anchor: &A, state: &LinkState) {
        anchor.set_href(&state.href);
        anchor.set_label(&state.label);
        match state.handler {
            HandlerChange::Keep => {}
            HandlerChange::Install(action) => {
                anchor.set_click_handler(Some(self.handler_for(action)));
            }
            HandlerChange::Remove => anchor.set_click_handler(None),
        }
    }

    fn handler_for(&self, action: ClickAction) -> ClickHandler {
        let session = Rc::clone(&self.session);
        let navigator = Rc::clone(&self.navigator);
        Rc::new(move || perform(action, session.as_ref(), navigator.as_ref()))
    }
}

/// Runs a click action against the session and navigator.
pub fn perform<S, N>(action: ClickAction, session: &S, navigator: &N)
where
    S: SessionRepository + ?Sized,
    N: Navigator + ?Sized,
{
    match action {
        ClickAction::Logout => {
            if let Err(err) = session.clear_current_user() {
                warn!(error = %err, "failed to clear session on logout");
            }
            navigator.navigate(Destination::Home);
        }
        ClickAction::Navigate(destination) => navigator.navigate(destination),
    }
}
