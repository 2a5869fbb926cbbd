//! Poke/friends models and the poke service protocol.

use serde::{Deserialize, Serialize};

use crate::{SubmitPolicy, TransportError};

/// A user shown in the poke screens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokeUser {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_first_meet: bool,
    #[serde(default)]
    pub is_already_poke: bool,
    #[serde(default)]
    pub poke_num: u32,
    #[serde(default)]
    pub relation_name: String,
    #[serde(default)]
    pub mutual: Vec<String>,
}

/// Friends grouped by closeness, as shown on the "my friends" landing page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokeFriends {
    #[serde(default)]
    pub friends: Vec<PokeUser>,
    #[serde(default)]
    pub best_friends: Vec<PokeUser>,
    #[serde(default)]
    pub soulmates: Vec<PokeUser>,
}

/// One page of friends for a single relation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokeFriendsPage {
    pub relation_name: String,
    pub page_size: u32,
    pub total_size: u32,
    #[serde(default)]
    pub friends: Vec<PokeUser>,
}

/// A canned poke message picked by the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeMessage {
    pub id: i64,
    pub content: String,
}

/// Command directed at the poke service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PokeCmd {
    /// Load the grouped friends overview.
    GetFriends,
    /// Load a page of friends for one relation.
    GetFriendsByRelation { relation: String, page: u32 },
    /// Poke a user with a message.
    Poke { user_id: i64, message: String },
}

impl PokeCmd {
    /// Returns the scheduler policy for this command.
    pub fn submit_policy(&self) -> SubmitPolicy {
        match self {
            PokeCmd::GetFriends => SubmitPolicy::Coalesce,
            PokeCmd::GetFriendsByRelation { .. } => SubmitPolicy::BestEffort,
            PokeCmd::Poke { .. } => SubmitPolicy::Lossless,
        }
    }

    /// Whether `rep` is the kind of report this command produces.
    pub fn answered_by(&self, rep: &PokeRep) -> bool {
        matches!(
            (self, rep),
            (PokeCmd::GetFriends, PokeRep::Friends(_))
                | (PokeCmd::GetFriendsByRelation { .. }, PokeRep::FriendsList(_))
                | (PokeCmd::Poke { .. }, PokeRep::Poked(_))
        )
    }
}

/// Poke service report variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PokeRep {
    /// Grouped friends overview.
    Friends(Result<PokeFriends, TransportError>),
    /// A page of friends for one relation.
    FriendsList(Result<PokeFriendsPage, TransportError>),
    /// The poked user, with updated poke counters.
    Poked(Result<PokeUser, TransportError>),
}
