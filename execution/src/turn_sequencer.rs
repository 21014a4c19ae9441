//! Turn sequencer state machine for a single round.
//!
//! ## Phases
//!
//! A round progresses through four phases:
//! 1. **ArbitratingFirstMove** - The player guesses a committed bit; a correct guess picks first
//! 2. **SelectingDice** - Both sides take one die from the pool, in arbitration order
//! 3. **Throwing** - One fair draw per die selects the face each side shows
//! 4. **Resolved** - The higher face wins, equal faces tie
//!
//! **Exited** is reachable from the first three phases whenever the player
//! enters `X` (or input ends). Both `Resolved` and `Exited` are terminal; a
//! session plays exactly one round.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fairdice_execution::{OsRandom, RoundOutcome, TurnSequencer};
//!
//! let mut sequencer = TurnSequencer::new(dice, OsRandom);
//! match sequencer.run(&mut console)? {
//!     RoundOutcome::Resolved(throw) => println!("{:?}", throw.winner),
//!     RoundOutcome::Exited => {}
//! }
//! ```

use std::cmp::Ordering;

use fairdice_types::{DiceSet, Die};
use tracing::{debug, info};

use crate::console::{solicit, Console, Menu, Tone};
use crate::{FairRandom, GameError, HelpScreen, RandomSource};

/// Printed once when the player leaves.
pub const EXIT_MESSAGE: &str = "Exiting the game.";

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    ArbitratingFirstMove,
    SelectingDice,
    Throwing,
    Resolved,
    Exited,
}

impl Phase {
    /// Next phase on the non-exit path.
    ///
    /// Returns `None` for terminal phases.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::ArbitratingFirstMove => Some(Phase::SelectingDice),
            Phase::SelectingDice => Some(Phase::Throwing),
            Phase::Throwing => Some(Phase::Resolved),
            Phase::Resolved | Phase::Exited => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Resolved | Phase::Exited)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    User,
    Computer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winner {
    User,
    Computer,
    Tie,
}

/// Faces shown by both dice and who won.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrowResult {
    pub user_die: Die,
    pub computer_die: Die,
    pub user_face: i64,
    pub computer_face: i64,
    pub winner: Winner,
}

impl ThrowResult {
    pub fn new(user_die: Die, computer_die: Die, user_face: i64, computer_face: i64) -> Self {
        let winner = match user_face.cmp(&computer_face) {
            Ordering::Greater => Winner::User,
            Ordering::Less => Winner::Computer,
            Ordering::Equal => Winner::Tie,
        };
        Self {
            user_die,
            computer_die,
            user_face,
            computer_face,
            winner,
        }
    }

    /// Line announcing the result.
    pub fn announcement(&self) -> String {
        match self.winner {
            Winner::User => format!("You win ({} > {})!", self.user_face, self.computer_face),
            Winner::Computer => format!("I win ({} > {})!", self.computer_face, self.user_face),
            Winner::Tie => "It's a tie!".to_string(),
        }
    }
}

/// How the round ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Resolved(ThrowResult),
    Exited,
}

/// Mutable state of the single round, owned by the [`TurnSequencer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    available: DiceSet,
    first_mover: Option<Player>,
    user_die: Option<Die>,
    computer_die: Option<Die>,
    throw: Option<ThrowResult>,
    phase: Phase,
}

impl GameSession {
    pub fn new(dice: DiceSet) -> Self {
        Self {
            available: dice,
            first_mover: None,
            user_die: None,
            computer_die: None,
            throw: None,
            phase: Phase::ArbitratingFirstMove,
        }
    }

    /// Dice nobody has taken yet.
    pub fn available(&self) -> &DiceSet {
        &self.available
    }

    pub fn first_mover(&self) -> Option<Player> {
        self.first_mover
    }

    pub fn user_die(&self) -> Option<&Die> {
        self.user_die.as_ref()
    }

    pub fn computer_die(&self) -> Option<&Die> {
        self.computer_die.as_ref()
    }

    pub fn throw(&self) -> Option<&ThrowResult> {
        self.throw.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn exited(&self) -> bool {
        self.phase == Phase::Exited
    }
}

/// Drives one round through its phases using fair draws.
pub struct TurnSequencer<R: RandomSource> {
    session: GameSession,
    fair: FairRandom<R>,
    help: HelpScreen,
}

impl<R: RandomSource> TurnSequencer<R> {
    pub fn new(dice: DiceSet, source: R) -> Self {
        let help = HelpScreen::new(&dice);
        Self {
            session: GameSession::new(dice),
            fair: FairRandom::new(source),
            help,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn fair_random(&self) -> &FairRandom<R> {
        &self.fair
    }

    /// Run the current phase to completion and move to the next one.
    ///
    /// Terminal phases are left unchanged. On error the session is restored to
    /// what it was before the step, including dice taken earlier in the phase.
    pub fn step(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        let current = self.session.phase;
        let before = self.session.clone();
        let next = match current {
            Phase::ArbitratingFirstMove => self.arbitrate(console),
            Phase::SelectingDice => self.select_dice(console),
            Phase::Throwing => self.throw(console),
            Phase::Resolved | Phase::Exited => return Ok(current),
        };
        let next = match next {
            Ok(next) => next,
            Err(err) => {
                self.session = before;
                return Err(err);
            }
        };
        debug!(from = ?current, to = ?next, "phase transition");
        self.session.phase = next;
        Ok(next)
    }

    /// Play the round until it resolves or the player exits.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<RoundOutcome, GameError> {
        while !self.session.phase.is_terminal() {
            self.step(console)?;
        }
        match (&self.session.phase, &self.session.throw) {
            (Phase::Resolved, Some(throw)) => Ok(RoundOutcome::Resolved(throw.clone())),
            _ => Ok(RoundOutcome::Exited),
        }
    }

    fn exit(&mut self, console: &mut dyn Console) -> Phase {
        info!(phase = ?self.session.phase, "player exited");
        console.emit(Tone::Danger, EXIT_MESSAGE);
        Phase::Exited
    }

    fn arbitrate(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        console.info("Let's determine who makes the first move.");
        let Some(guess) = self.fair.guess_bit(console, &self.help)? else {
            return Ok(self.exit(console));
        };
        let first = if guess.correct {
            Player::User
        } else {
            Player::Computer
        };
        debug!(?first, "first mover decided");
        self.session.first_mover = Some(first);
        Ok(Phase::SelectingDice)
    }

    fn select_dice(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        if self.session.first_mover == Some(Player::User) {
            if !self.pick_user_die(console)? {
                return Ok(self.exit(console));
            }
            self.pick_computer_die(console, false)?;
        } else {
            self.pick_computer_die(console, true)?;
            if !self.pick_user_die(console)? {
                return Ok(self.exit(console));
            }
        }
        Ok(Phase::Throwing)
    }

    /// Prompt the player for a die from the pool. Returns `false` if they exit.
    fn pick_user_die(&mut self, console: &mut dyn Console) -> Result<bool, GameError> {
        if self.session.available.is_empty() {
            return Err(GameError::NoDiceAvailable);
        }
        let menu = self.session.available.iter().fold(
            Menu::new().heading(Tone::Info, "Choose your dice:"),
            |menu, die| menu.choice(die.to_string()),
        );
        let Some(index) = solicit(console, &menu, &self.help, "Invalid selection. Please try again.")?
        else {
            return Ok(false);
        };

        let index = index as usize;
        let die = self
            .session
            .available
            .get(index)
            .cloned()
            .ok_or(GameError::NoDiceAvailable)?;
        self.session.available = self.session.available.without(index);
        console.info(&format!("You choose the [{die}] dice."));
        debug!(position = die.position(), "user picked die");
        self.session.user_die = Some(die);
        Ok(true)
    }

    fn pick_computer_die(&mut self, console: &mut dyn Console, first: bool) -> Result<(), GameError> {
        let index = self.fair.choose_index(self.session.available.len())?;
        let die = self
            .session
            .available
            .get(index)
            .cloned()
            .ok_or(GameError::NoDiceAvailable)?;
        self.session.available = self.session.available.without(index);
        if first {
            console.info(&format!("I make the first move and choose the [{die}] dice."));
        } else {
            console.info(&format!("I choose the [{die}] dice."));
        }
        debug!(position = die.position(), "computer picked die");
        self.session.computer_die = Some(die);
        Ok(())
    }

    /// Fair draw of a face index for `die`. `None` if the player exits.
    fn roll(&mut self, console: &mut dyn Console, die: &Die) -> Result<Option<i64>, GameError> {
        let max = die.face_count() as u64 - 1;
        let Some(draw) = self.fair.draw(max, console, &self.help)? else {
            return Ok(None);
        };
        die.face_at(draw.result as usize)
            .map(Some)
            .ok_or(GameError::FaceOutOfRange {
                index: draw.result,
                faces: die.face_count(),
            })
    }

    fn throw(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        let computer_die = self
            .session
            .computer_die
            .clone()
            .ok_or(GameError::DieNotChosen(Player::Computer))?;
        let user_die = self
            .session
            .user_die
            .clone()
            .ok_or(GameError::DieNotChosen(Player::User))?;

        console.info("It's time for my throw.");
        let Some(computer_face) = self.roll(console, &computer_die)? else {
            return Ok(self.exit(console));
        };
        console.info(&format!("My throw is {computer_face}."));

        console.info("It's time for your throw.");
        let Some(user_face) = self.roll(console, &user_die)? else {
            return Ok(self.exit(console));
        };
        console.info(&format!("Your throw is {user_face}."));

        let throw = ThrowResult::new(user_die, computer_die, user_face, computer_face);
        let tone = match throw.winner {
            Winner::User => Tone::Success,
            Winner::Computer => Tone::Danger,
            Winner::Tie => Tone::Info,
        };
        console.emit(tone, &throw.announcement());
        info!(user_face, computer_face, winner = ?throw.winner, "round resolved");
        self.session.throw = Some(throw);
        Ok(Phase::Resolved)
    }
}
