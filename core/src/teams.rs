use crate::{
    error::{PartyError, PartyResult},
    rng::RandomSource,
};

/// Shuffle the players and deal them round-robin into `count` teams.
pub fn generate_teams<R: RandomSource>(
    participants: &[String],
    count: usize,
    rng: &mut R,
) -> PartyResult<Vec<Vec<String>>> {
    if count == 0 {
        return Err(PartyError::invalid("team count must be at least 1"));
    }
    if participants.len() < count {
        return Err(PartyError::NotEnoughPlayers {
            players: participants.len(),
            teams: count,
        });
    }

    let mut shuffled = participants.to_vec();
    rng.shuffle(&mut shuffled);

    let mut teams = vec![Vec::new(); count];
    for (i, player) in shuffled.into_iter().enumerate() {
        teams[i % count].push(player);
    }
    Ok(teams)
}
