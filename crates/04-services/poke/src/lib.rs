//! In-process poke service answering friend lookups from a script.

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use service_abi::{
    PokeCmd, PokeFriends, PokeFriendsPage, PokeRep, PokeServiceHandle, PokeUser, Service,
    SubmitOutcome, TransportError,
};
use services_common::{ReportQueue, Scripted, ScriptedSequence};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

const DEFAULT_CAPACITY: usize = 16;

/// Answers the poke service replays, per request kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokeScript {
    #[serde(default)]
    pub friends: ScriptedSequence<Scripted<PokeFriends>>,
    #[serde(default)]
    pub friends_pages: ScriptedSequence<Scripted<PokeFriendsPage>>,
    /// Users known to the service; pokes for anyone else fail with 404.
    #[serde(default)]
    pub users: Vec<PokeUser>,
}

/// Scripted poke service.
pub struct PokeService {
    reports: ReportQueue<PokeRep>,
    script: Mutex<PokeScript>,
}

impl PokeService {
    pub fn new(capacity: usize, script: PokeScript) -> Arc<Self> {
        Arc::new(Self {
            reports: ReportQueue::with_capacity(capacity),
            script: Mutex::new(script),
        })
    }

    pub fn new_handle(capacity: usize, script: PokeScript) -> PokeServiceHandle {
        Self::new(capacity, script)
    }

    fn answer(&self, cmd: &PokeCmd) -> PokeRep {
        let mut script = self.script.lock();
        match cmd {
            PokeCmd::GetFriends => PokeRep::Friends(
                script
                    .friends
                    .next_answer()
                    .map_or(Err(TransportError::Disconnected), Scripted::into_result),
            ),
            PokeCmd::GetFriendsByRelation { relation, .. } => PokeRep::FriendsList(
                script
                    .friends_pages
                    .next_answer()
                    .map_or(Err(TransportError::Disconnected), Scripted::into_result)
                    .map(|mut page| {
                        page.relation_name = relation.clone();
                        page
                    }),
            ),
            PokeCmd::Poke { user_id, message } => {
                let Some(user) = script.users.iter_mut().find(|u| u.user_id == *user_id) else {
                    return PokeRep::Poked(Err(TransportError::status(404, "존재하지 않는 유저입니다")));
                };
                user.is_already_poke = true;
                user.poke_num = user.poke_num.saturating_add(1);
                user.message = message.clone();
                PokeRep::Poked(Ok(user.clone()))
            }
        }
    }
}

impl Default for PokeService {
    fn default() -> Self {
        Self {
            reports: ReportQueue::with_capacity(DEFAULT_CAPACITY),
            script: Mutex::new(PokeScript::default()),
        }
    }
}

impl Service for PokeService {
    type Cmd = PokeCmd;
    type Rep = PokeRep;

    fn try_submit(&self, cmd: &Self::Cmd) -> SubmitOutcome {
        let outcome = self.reports.try_submit(
            cmd.submit_policy(),
            1,
            |queued| cmd.answered_by(queued),
            || smallvec![self.answer(cmd)],
        );
        debug!("poke service {cmd:?} -> {outcome:?}");
        outcome
    }

    fn drain(&self, max: usize) -> SmallVec<[Self::Rep; 8]> {
        self.reports.drain(max)
    }
}

/// Creates a poke service handle with default capacity and no script.
pub fn default_service() -> PokeServiceHandle {
    Arc::new(PokeService::default())
}
