use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use contracts::domain::common::AggregateId;
use contracts::shared::options::SelectOption;
use tokio::task::JoinSet;

use super::relation::{Relation, RelationKey};
use crate::shared::error::{BatchFailure, ConsoleError, ValidationError};
use crate::shared::gateway::{Gateway, GatewayResult};
use crate::shared::list_utils::filter_list;
use crate::system::auth::SessionHandle;

pub type RelationSet<R> = HashSet<RelationKey<<R as Relation>::Owner, <R as Relation>::Member>>;

/// Result of a fully successful bulk update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkReport {
    /// Members whose membership changed
    pub applied: usize,
    /// Members already in the desired state (no call issued)
    pub unchanged: usize,
}

/// Local mirror of one relationship type
///
/// The set only ever reflects backend calls that succeeded. Mutations apply to
/// the selected owner.
pub struct RelationStore<R: Relation> {
    gateway: Arc<dyn Gateway>,
    session: SessionHandle,
    keys: RelationSet<R>,
    owners: Vec<SelectOption<R::Owner>>,
    members: Vec<SelectOption<R::Member>>,
    selected: Option<R::Owner>,
}

impl<R: Relation> RelationStore<R> {
    pub fn new(gateway: Arc<dyn Gateway>, session: SessionHandle) -> Self {
        Self {
            gateway,
            session,
            keys: HashSet::new(),
            owners: Vec::new(),
            members: Vec::new(),
            selected: None,
        }
    }

    /// Fetch rows and option lists; on failure the store is left empty
    pub async fn load(&mut self) -> Result<&RelationSet<R>, ConsoleError> {
        self.reset();
        self.session.require()?;

        let gateway = self.gateway.as_ref();
        let fetched = tokio::try_join!(R::list(gateway), R::owners(gateway), R::members(gateway));

        match fetched {
            Ok((rows, owners, members)) => {
                self.keys = rows.into_iter().collect();
                self.owners = owners;
                self.members = members;
                tracing::info!(
                    "Loaded {} {} relations ({} owners, {} members)",
                    self.keys.len(),
                    R::NAME,
                    self.owners.len(),
                    self.members.len()
                );
                Ok(&self.keys)
            }
            Err(e) => {
                tracing::error!("Failed to load {} relations: {}", R::NAME, e);
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.keys.clear();
        self.owners.clear();
        self.members.clear();
        self.selected = None;
    }

    pub fn relations(&self) -> &RelationSet<R> {
        &self.keys
    }

    pub fn owners(&self) -> &[SelectOption<R::Owner>] {
        &self.owners
    }

    pub fn members(&self) -> &[SelectOption<R::Member>] {
        &self.members
    }

    pub fn is_assigned(&self, owner: &R::Owner, member: &R::Member) -> bool {
        self.keys
            .contains(&RelationKey::new(owner.clone(), member.clone()))
    }

    /// Choose the owner whose memberships are edited
    pub fn select_owner(&mut self, owner: R::Owner) -> Result<(), ValidationError> {
        if !self.owners.iter().any(|o| o.value == owner) {
            return Err(ValidationError::UnknownOwner(owner.as_string()));
        }
        self.selected = Some(owner);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&R::Owner> {
        self.selected.as_ref()
    }

    /// Members assigned to the selected owner, sorted
    pub fn assigned_members(&self) -> Vec<R::Member> {
        let Some(owner) = &self.selected else {
            return Vec::new();
        };
        let mut members: Vec<R::Member> = self
            .keys
            .iter()
            .filter(|k| &k.owner == owner)
            .map(|k| k.member.clone())
            .collect();
        members.sort();
        members
    }

    pub fn filtered_owners(&self, term: &str) -> Vec<SelectOption<R::Owner>> {
        filter_list(&self.owners, term)
    }

    pub fn filtered_members(&self, term: &str) -> Vec<SelectOption<R::Member>> {
        filter_list(&self.members, term)
    }

    fn editable_owner(&self) -> Result<R::Owner, ConsoleError> {
        self.session.require_admin()?;
        self.selected
            .clone()
            .ok_or_else(|| ValidationError::NoOwnerSelected.into())
    }

    fn check_member(&self, member: &R::Member) -> Result<(), ValidationError> {
        if self.members.iter().any(|m| &m.value == member) {
            Ok(())
        } else {
            Err(ValidationError::UnknownMember(member.as_string()))
        }
    }

    /// Bring one membership of the selected owner to `desired`
    ///
    /// Returns whether a backend call was made. The set changes only after
    /// that call succeeds.
    pub async fn toggle(&mut self, member: &R::Member, desired: bool) -> Result<bool, ConsoleError> {
        let owner = self.editable_owner()?;
        self.check_member(member)?;

        let key = RelationKey::new(owner, member.clone());
        if self.keys.contains(&key) == desired {
            return Ok(false);
        }

        let result = if desired {
            R::create(self.gateway.as_ref(), &key.owner, &key.member).await
        } else {
            R::delete(self.gateway.as_ref(), &key.owner, &key.member).await
        };

        if let Err(e) = result {
            tracing::error!(
                "{} {} -> {} failed: {}",
                R::NAME,
                key.owner,
                key.member,
                e
            );
            return Err(e);
        }

        tracing::info!(
            "{} {} -> {} {}",
            R::NAME,
            key.owner,
            key.member,
            if desired { "assigned" } else { "removed" }
        );
        if desired {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
        Ok(true)
    }

    /// Bring every listed membership of the selected owner to `desired`
    ///
    /// Calls for the members that differ run concurrently. Once all of them
    /// settle, exactly the succeeded members are applied; if any failed the
    /// error names each of them. Unknown members reject the whole batch before
    /// any call.
    pub async fn bulk_set(
        &mut self,
        members: &[R::Member],
        desired: bool,
    ) -> Result<BulkReport, ConsoleError> {
        let owner = self.editable_owner()?;
        for member in members {
            self.check_member(member)?;
        }

        let mut seen = HashSet::new();
        let requested: Vec<R::Member> = members
            .iter()
            .filter(|m| seen.insert((*m).clone()))
            .cloned()
            .collect();
        let pending: Vec<R::Member> = requested
            .iter()
            .filter(|m| self.is_assigned(&owner, m) != desired)
            .cloned()
            .collect();
        let unchanged = requested.len() - pending.len();

        if pending.is_empty() {
            return Ok(BulkReport {
                applied: 0,
                unchanged,
            });
        }

        let mut calls = JoinSet::new();
        for member in pending.iter().cloned() {
            let gateway = Arc::clone(&self.gateway);
            let owner = owner.clone();
            calls.spawn(async move {
                let result: GatewayResult<()> = if desired {
                    R::create(gateway.as_ref(), &owner, &member).await
                } else {
                    R::delete(gateway.as_ref(), &owner, &member).await
                };
                (member, result)
            });
        }

        let mut outcomes: HashMap<R::Member, GatewayResult<()>> = HashMap::new();
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok((member, result)) => {
                    outcomes.insert(member, result);
                }
                Err(e) => tracing::error!("{} bulk call did not complete: {}", R::NAME, e),
            }
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for member in pending {
            match outcomes.remove(&member) {
                Some(Ok(())) => succeeded.push(member),
                Some(Err(e)) => failed.push(BatchFailure {
                    member: member.as_string(),
                    reason: e.to_string(),
                }),
                None => failed.push(BatchFailure {
                    member: member.as_string(),
                    reason: "call did not complete".into(),
                }),
            }
        }

        let applied = succeeded.len();
        for member in succeeded {
            let key = RelationKey::new(owner.clone(), member);
            if desired {
                self.keys.insert(key);
            } else {
                self.keys.remove(&key);
            }
        }

        if failed.is_empty() {
            tracing::info!(
                "{} bulk update for {}: {} applied, {} unchanged",
                R::NAME,
                owner,
                applied,
                unchanged
            );
            Ok(BulkReport { applied, unchanged })
        } else {
            tracing::warn!(
                "{} bulk update for {}: {} applied, {} failed",
                R::NAME,
                owner,
                applied,
                failed.len()
            );
            Err(ConsoleError::PartialBatch { applied, failed })
        }
    }
}
