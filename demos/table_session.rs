//! Table Session Example
//!
//! Spins up a table actor, seats three players, and plays one scripted
//! hand end to end over the async handle. Every player checks or calls,
//! so the hand always reaches showdown.

use holdem_table::{GameEvent, GameSettings, JoinReply, PlayerAction, SessionId, TableActor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Table Session Example ===\n");

    let (handle, task) = TableActor::spawn(GameSettings::default())?;

    // Everyone joins before the first deal.
    let alice = handle.join("alice").await?;
    let bob = handle.join("bob").await?;
    let carol = handle.join("carol").await?;
    let roster = [("alice", alice), ("bob", bob), ("carol", carol)];
    for (name, reply) in &roster {
        println!("{name} takes seat {}", reply.seat);
    }

    // Alice's session doubles as our spectator feed. Subscribing before
    // the deal means the feed sees the hand from the first card.
    let mut feed = handle.subscribe(alice.session).await?;
    handle.start_game(alice.session).await?;
    println!("\ngame on\n");

    // Script the hand: whoever is prompted calls any bet or checks it
    // through, printing the feed as it arrives.
    let mut showdown_reached = false;
    'hand: for _ in 0..64 {
        while let Ok(event) = feed.try_recv() {
            print_event(&event);
            if matches!(event, GameEvent::DeclareWinners { .. }) {
                showdown_reached = true;
                break 'hand;
            }
        }

        let view = handle.view().await?;
        let Some(seat) = view.action_seat else {
            break;
        };
        let session = session_for(&roster, seat);
        let owed = view.bet_to_call - view.players[seat].round_bet;
        let action = if owed > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        handle.act(session, action).await?;
    }

    // The table chains straight into the next hand after paying out;
    // drain whatever it queued before we hang up.
    while let Ok(event) = feed.try_recv() {
        if matches!(event, GameEvent::DeclareWinners { .. }) {
            print_event(&event);
            showdown_reached = true;
        }
    }
    assert!(showdown_reached, "scripted hand never reached showdown");

    let view = handle.view().await?;
    println!("\nfinal table state:");
    println!("{}", serde_json::to_string_pretty(&view)?);

    handle.shutdown().await?;
    task.await?;

    println!("\n=== End of Table Session Example ===");
    Ok(())
}

fn session_for(roster: &[(&str, JoinReply)], seat: usize) -> SessionId {
    roster
        .iter()
        .find(|(_, reply)| reply.seat == seat)
        .map(|(_, reply)| reply.session)
        .expect("every seat was dealt a session")
}

fn print_event(event: &GameEvent) {
    match event {
        // Snapshots arrive after every action; one line each keeps the
        // transcript readable.
        GameEvent::GameState(view) => {
            println!("[{}] pot ${}, ${} to call", view.phase, view.pot, view.bet_to_call);
        }
        other => println!("{other}"),
    }
}
