//! Circle-method pairing.
//!
//! Slot 0 is the fixed anchor and the remaining slots rotate one position
//! clockwise after every round. With an odd team count the synthetic bye
//! takes the anchor slot, so every real team sits out exactly once.

/// A pairing by index into the caller's team slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub home: usize,
    pub away: usize,
}

/// Single-leg round-robin over `team_count` teams: `rounds[r]` holds the
/// pairings of round `r + 1`. Bye pairings are left out.
pub fn single_leg(team_count: usize) -> Vec<Vec<Pairing>> {
    if team_count < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<usize>> = Vec::with_capacity(team_count + 1);
    if team_count % 2 == 1 {
        slots.push(None);
    }
    slots.extend((0..team_count).map(Some));

    let size = slots.len();
    let half = size / 2;
    let mut rounds = Vec::with_capacity(size - 1);

    for round in 0..size - 1 {
        let mut pairings = Vec::with_capacity(half);
        for i in 0..half {
            let (a, b) = (slots[i], slots[size - 1 - i]);
            // Anchor alternates by round, the other rows by table position.
            let a_home = if i == 0 { round % 2 == 0 } else { i % 2 == 1 };
            let (home, away) = if a_home { (a, b) } else { (b, a) };
            if let (Some(home), Some(away)) = (home, away) {
                pairings.push(Pairing { home, away });
            }
        }
        rounds.push(pairings);

        // The last slot moves to the front of the ring, anchor stays put.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    rounds
}
