use hub::Intent;
use pretty_assertions::assert_eq;
use service_abi::{PokeFriends, PokeFriendsPage, PokeMessage, PokeUser, TransportError};
use services_attendance::AttendanceScript;
use services_common::Scripted;
use services_poke::PokeScript;
use world::FetchSource;

use crate::fixtures::{session, PUMP_ROUNDS};

fn friend(user_id: i64, name: &str) -> PokeUser {
    PokeUser {
        user_id,
        name: name.to_string(),
        profile_image: String::new(),
        message: String::new(),
        is_first_meet: false,
        is_already_poke: false,
        poke_num: 0,
        relation_name: "친구".to_string(),
        mutual: Vec::new(),
    }
}

fn poke_script() -> PokeScript {
    let mut script = PokeScript::default();
    script.friends.push(Scripted::Ok(PokeFriends {
        friends: vec![friend(1, "김솝트"), friend(2, "이솝트")],
        best_friends: vec![friend(3, "박솝트")],
        soulmates: Vec::new(),
    }));
    script.friends_pages.push(Scripted::Ok(PokeFriendsPage {
        relation_name: String::new(),
        page_size: 10,
        total_size: 2,
        friends: vec![friend(1, "김솝트"), friend(2, "이솝트")],
    }));
    script.users = vec![friend(1, "김솝트")];
    script
}

/// Friends, a relation page, and a poke all land on their own streams.
#[test]
fn poke_flow_reaches_the_view() {
    let (mut session, _services) = session(AttendanceScript::new(), poke_script());
    let output = session.output();
    let friends = output.friends.subscribe();
    let page = output.friends_list.subscribe();
    let poked = output.poked.subscribe();

    session.send(Intent::GetFriendsByRelation {
        relation: "친구".to_string(),
        page: 0,
    });
    session.send(Intent::GetFriends);
    session.send(Intent::Poke {
        user_id: 1,
        message: PokeMessage {
            id: 4,
            content: "밥 먹자!".to_string(),
        },
    });
    session.pump(PUMP_ROUNDS);

    let overview = friends.try_next().expect("friends overview");
    assert_eq!(overview.friends.len(), 2);
    assert_eq!(overview.best_friends.len(), 1);

    let relation_page = page.try_next().expect("friends page");
    assert_eq!(relation_page.relation_name, "친구");
    assert_eq!(relation_page.total_size, 2);

    let user = poked.try_next().expect("poked user");
    assert!(user.is_already_poke);
    assert_eq!(user.poke_num, 1);
    assert_eq!(user.message, "밥 먹자!");
}

/// Poking a stranger surfaces the server's refusal.
#[test]
fn poking_unknown_user_surfaces_failure() {
    let (mut session, _services) = session(AttendanceScript::new(), poke_script());
    let failures = session.output().fetch_failures.subscribe();

    session.send(Intent::Poke {
        user_id: 99,
        message: PokeMessage {
            id: 1,
            content: "콕".to_string(),
        },
    });
    session.pump(PUMP_ROUNDS);

    let failure = failures.try_next().expect("poke failure");
    assert_eq!(failure.source, FetchSource::Poke);
    assert!(matches!(failure.error, TransportError::Status { code: 404, .. }));
}
