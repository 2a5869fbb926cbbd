//! Pure intent reducer for the attendance screen.

use crate::types::{AttendanceCmd, Emission, Intent, IntentEffects, PokeCmd, WorkCmd};
use crate::world::AttendanceWorld;

/// Trait for handling intents and producing work commands.
pub trait IntentReducer {
    /// Reduces an intent into work commands and immediate emissions.
    fn reduce_intent(&mut self, intent: Intent) -> IntentEffects;
}

impl IntentReducer for AttendanceWorld {
    fn reduce_intent(&mut self, intent: Intent) -> IntentEffects {
        let mut effects = IntentEffects::new();
        match intent {
            Intent::ViewWillAppear => {
                self.loading = true;
                effects.push_emission(Emission::Loading(true));
                push_screen_fetches(&mut effects);
            }
            Intent::Refresh => push_screen_fetches(&mut effects),
            Intent::FetchLectureRound { lecture_id } => {
                effects.push_work(WorkCmd::Attendance(AttendanceCmd::FetchRound { lecture_id }));
            }
            Intent::GetFriends => effects.push_work(WorkCmd::Poke(PokeCmd::GetFriends)),
            Intent::GetFriendsByRelation { relation, page } => {
                effects.push_work(WorkCmd::Poke(PokeCmd::GetFriendsByRelation { relation, page }));
            }
            Intent::Poke { user_id, message } => effects.push_work(WorkCmd::Poke(PokeCmd::Poke {
                user_id,
                message: message.content,
            })),
        }
        effects
    }
}

fn push_screen_fetches(effects: &mut IntentEffects) {
    effects.push_work(WorkCmd::Attendance(AttendanceCmd::FetchSchedule));
    effects.push_work(WorkCmd::Attendance(AttendanceCmd::FetchScore));
}
