//! Round orchestration.
//!
//! Drives the phase state machine:
//!
//! ```text
//! NotStarted -> Report(1) -> Defense(1) -> Vote(1) -> Report(2) -> ... -> Finished
//! ```
//!
//! Each call to [`Orchestrator::step`] performs the work of the current
//! phase and moves to the next one. Victory is checked after every vote;
//! at the round cap the game is decided regardless.
//!
//! The orchestrator owns the only `GameRng` of the game, so a seed and a
//! deterministic narrator reproduce a run exactly.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{
    Faction, GameConfig, GameError, GameResult, GameRng, GameRngState, GameState, Phase, Player,
    PlayerId, Victory, PLAYER_COUNT,
};
use crate::events::{EventSink, GameEvent, NullSink};
use crate::narration::{CannedSource, NarrationService, Narrator};
use crate::rules::{check_victory, forced_decision, Headcount, RoleAssignment};
use crate::suspicion::{SuspicionEngine, Transcript};
use crate::voting::VotingResolver;

use super::summary::{Ejection, GameSummary};

type Seats = SmallVec<[PlayerId; PLAYER_COUNT]>;

/// Owner of one game.
pub struct Orchestrator<N, E> {
    config: GameConfig,
    rng: GameRng,
    assignment: RoleAssignment,
    players: Vec<Player>,
    state: GameState,
    narrator: N,
    sink: E,
    suspicion: SuspicionEngine,
    voting: VotingResolver,
    ejections: Vec<Ejection>,
}

impl Orchestrator<Narrator<CannedSource>, NullSink> {
    /// Offline game with default rules and no event output.
    #[must_use]
    pub fn canned(seed: u64) -> Self {
        let config = GameConfig::default();
        let narrator = Narrator::new(CannedSource, &config);
        Self::new(config, seed, narrator, NullSink)
    }
}

impl<N: NarrationService, E: EventSink> Orchestrator<N, E> {
    /// Deal roles from `seed` and prepare a game.
    pub fn new(config: GameConfig, seed: u64, narrator: N, sink: E) -> Self {
        let mut rng = GameRng::new(seed);
        let assignment = RoleAssignment::assign(&mut rng);
        Self::with_assignment(config, rng, assignment, narrator, sink)
    }

    /// Prepare a game with roles already dealt.
    pub fn with_assignment(
        config: GameConfig,
        rng: GameRng,
        assignment: RoleAssignment,
        narrator: N,
        sink: E,
    ) -> Self {
        let players = assignment
            .iter()
            .map(|(id, role)| Player::new(id, role))
            .collect();
        let voting = VotingResolver::from_config(&config);

        Self {
            config,
            rng,
            assignment,
            players,
            state: GameState::new(),
            narrator,
            sink,
            suspicion: SuspicionEngine::default(),
            voting,
            ejections: Vec::new(),
        }
    }

    /// Replace the scoring bands.
    #[must_use]
    pub fn with_suspicion(mut self, engine: SuspicionEngine) -> Self {
        self.suspicion = engine;
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn sink(&self) -> &E {
        &self.sink
    }

    #[must_use]
    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    /// Active seats, ascending.
    fn active(&self) -> GameResult<Seats> {
        let active: Seats = self.state.active_players().collect();
        if active.is_empty() {
            return Err(GameError::EmptyActiveSet);
        }
        Ok(active)
    }

    fn index_of(&self, player: PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Head counts for the current state.
    #[must_use]
    pub fn headcount(&self) -> Headcount {
        Headcount::of(&self.state, &self.assignment)
    }

    /// Evaluate the victory conditions for the current state.
    ///
    /// Pure: repeated calls on the same state agree. A decided game returns
    /// its recorded victory; the round-cap decision is only taken after the
    /// final vote, so an undecided game never reports it early.
    #[must_use]
    pub fn evaluate_victory(&self) -> Option<Victory> {
        match self.state.phase() {
            Phase::Finished(victory) => Some(victory),
            _ => check_victory(self.headcount()),
        }
    }

    /// Outcome once the vote of `round` has been resolved.
    fn victory_after_vote(&self, round: u8) -> Option<Victory> {
        let count = self.headcount();
        check_victory(count)
            .or_else(|| (round >= self.config.vote_rounds).then(|| forced_decision(count)))
    }

    /// Perform the current phase and advance to the next.
    ///
    /// Returns the phase entered.
    pub fn step(&mut self) -> GameResult<Phase> {
        match self.state.phase() {
            Phase::NotStarted => {
                self.sink.emit(&GameEvent::GameStarted {
                    seed: self.rng.seed(),
                    roles: self.assignment.iter().collect(),
                });
                self.begin_round(1)?;
            }
            Phase::Report { round } => {
                self.run_reports(round)?;
                self.state.enter(Phase::Defense { round })?;
            }
            Phase::Defense { round } => {
                self.run_defenses(round)?;
                self.state.enter(Phase::Vote { round })?;
            }
            Phase::Vote { round } => self.run_vote(round)?,
            Phase::Finished(_) => return Err(GameError::GameOver),
        }
        Ok(self.state.phase())
    }

    /// Step until the game is decided.
    pub fn run(&mut self) -> GameResult<GameSummary> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        self.summary()
    }

    /// Post-game review. Fails while the game is undecided.
    pub fn summary(&self) -> GameResult<GameSummary> {
        let victory = self.state.victory().ok_or(GameError::Undecided)?;
        Ok(GameSummary {
            seed: self.rng.seed(),
            rounds_played: self.state.round(),
            victory,
            impostors: self.assignment.impostor_ids().to_vec(),
            ejections: self.ejections.clone(),
            players: self.players.clone(),
        })
    }

    fn begin_round(&mut self, round: u8) -> GameResult<()> {
        self.state.enter(Phase::Report { round })?;
        info!(round, active = self.state.active_players().count(), "voting round");
        self.sink.emit(&GameEvent::RoundStarted { round });
        Ok(())
    }

    fn run_reports(&mut self, round: u8) -> GameResult<()> {
        let active = self.active()?;
        for sub_round in 1..=self.config.reports_per_vote {
            for &id in &active {
                let idx = self.index_of(id)?;
                let text = self.narrator.report(&mut self.rng, &self.players[idx], sub_round);
                let player = &mut self.players[idx];
                player.reports.push(text.clone());
                self.sink.emit(&GameEvent::PlayerReported {
                    round,
                    sub_round,
                    player: id,
                    role: player.role,
                    text,
                });
            }
        }
        Ok(())
    }

    /// Pick who accuses each active player.
    ///
    /// Impostors lean on Crewmates and Crewmates lean on Impostors with
    /// probability `accusation_bias`; otherwise any other active seat.
    fn draw_accusers(&mut self, active: &[PlayerId]) -> GameResult<FxHashMap<PlayerId, PlayerId>> {
        let mut accusers = FxHashMap::default();
        for &id in active {
            let others: Seats = active.iter().copied().filter(|&p| p != id).collect();
            let faction = self.assignment.faction_of(id)?;
            let opposing: Seats = others
                .iter()
                .copied()
                .filter(|&p| match faction {
                    Faction::Impostor => !self.assignment.is_impostor(p),
                    Faction::Crewmate => self.assignment.is_impostor(p),
                })
                .collect();

            let pool = if !opposing.is_empty() && self.rng.gen_bool(self.config.accusation_bias) {
                &opposing
            } else {
                &others
            };
            let accuser = self.rng.choose(pool).copied().unwrap_or(id);
            accusers.insert(id, accuser);
        }
        Ok(accusers)
    }

    fn run_defenses(&mut self, round: u8) -> GameResult<()> {
        let active = self.active()?;
        let accusers = self.draw_accusers(&active)?;

        for &id in &active {
            let accuser = accusers.get(&id).copied().unwrap_or(id);
            let idx = self.index_of(id)?;
            let text = self.narrator.defense(&mut self.rng, &self.players[idx], accuser);
            self.players[idx].last_defense = Some(text.clone());
            self.sink.emit(&GameEvent::PlayerDefended {
                round,
                player: id,
                accuser,
                text,
            });
        }
        Ok(())
    }

    fn run_vote(&mut self, round: u8) -> GameResult<()> {
        let active = self.active()?;
        let transcript = Transcript::from_players(&self.players);
        let analysis = self
            .narrator
            .analyze_transcript(&transcript, self.assignment.impostor_ids());
        let scores = self.suspicion.score(
            &mut self.rng,
            &active,
            self.assignment.impostor_ids(),
            analysis,
        );
        self.sink.emit(&GameEvent::SuspicionScored {
            round,
            scores: scores.clone(),
        });

        let outcome = self.voting.resolve(
            &mut self.rng,
            &active,
            &scores,
            self.assignment.impostor_ids(),
            self.assignment.crewmate_ids(),
        )?;
        for ballot in &outcome.ballots {
            self.sink.emit(&GameEvent::PlayerVoted { round, ballot: *ballot });
        }

        VotingResolver::eject(&outcome, &mut self.state, &mut self.players)?;
        let role = self.assignment.role_of(outcome.ejected)?;
        let votes = outcome.tally.votes_for(outcome.ejected);
        self.ejections.push(Ejection {
            round,
            player: outcome.ejected,
            role,
            faction: role.faction(),
            votes,
        });
        self.sink.emit(&GameEvent::PlayerEliminated {
            round,
            player: outcome.ejected,
            role,
            faction: role.faction(),
            votes,
            tie_broken: outcome.tie_broken,
        });

        let count = self.headcount();
        self.sink.emit(&GameEvent::RoundEnded {
            round,
            impostors_left: count.impostors,
            crewmates_left: count.crewmates,
        });
        debug!(round, ?count, "after vote");

        match self.victory_after_vote(round) {
            Some(victory) => {
                self.state.finish(victory)?;
                info!(round, winner = %victory.winner, "game decided");
                self.sink.emit(&GameEvent::GameEnded { round, victory });
            }
            None => self.begin_round(round + 1)?,
        }
        Ok(())
    }
}
