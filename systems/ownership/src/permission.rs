use custom_spawners_core::PlayerId;

/// Player attempting to break a spawner, with the permissions the host granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    /// Player identity.
    pub id: PlayerId,
    /// Holds the administrative permission.
    pub is_admin: bool,
    /// Holds the ordinary `use` permission.
    pub can_use: bool,
}

/// Outcome of a break permission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakDecision {
    /// The actor may break the spawner.
    Allowed,
    /// The break must be cancelled.
    Denied,
}

/// Administrators may always break; otherwise only the recorded owner holding `use` may.
#[must_use]
pub fn break_decision(actor: &Actor, owner: Option<PlayerId>) -> BreakDecision {
    let is_owner = owner == Some(actor.id);
    if actor.is_admin || (is_owner && actor.can_use) {
        BreakDecision::Allowed
    } else {
        BreakDecision::Denied
    }
}
