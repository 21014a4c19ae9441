//! Help screen: game rules and the pairwise win probability table.

use fairdice_types::{win_probability, DiceSet, Die};
use prettytable::format::consts;
use prettytable::{Cell, Row, Table};

use crate::{Console, Tone};

const RULES: [&str; 5] = [
    "Game Rules:",
    "This is a dice game where you compete against the computer.",
    "First, it's determined who selects the dice first.",
    "Then, each player chooses a dice from the available options.",
    "Finally, each player's dice are used and the higher roll wins the round!",
];

const TABLE_TITLE: &str = "Probability of the win for the user:";
const CORNER_LABEL: &str = "User dice v";

/// Precomputed help output for one dice configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpScreen {
    table: String,
}

impl HelpScreen {
    pub fn new(dice: &DiceSet) -> Self {
        Self {
            table: render_table(dice),
        }
    }

    pub fn show(&self, console: &mut dyn Console) {
        console.say("");
        for line in RULES {
            console.emit(Tone::Success, line);
        }
        console.say("");
        for line in self.table.lines() {
            console.say(line);
        }
        console.say("");
    }
}

/// Cell for the user holding `user` against the computer holding `computer`.
///
/// A die facing itself is marked with `- (p)` since that pairing cannot occur in play.
pub fn format_cell(user: &Die, computer: &Die) -> String {
    let probability = format!("{:.4}", win_probability(user, computer));
    if user.position() == computer.position() {
        format!("- ({probability})")
    } else {
        probability
    }
}

/// Render the title line and the bordered table.
pub fn render_table(dice: &DiceSet) -> String {
    let mut table = Table::new();
    table.set_format(*consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let mut header = vec![Cell::new(CORNER_LABEL)];
    header.extend(dice.iter().map(|die| Cell::new(&die.to_string())));
    table.set_titles(Row::new(header));

    for user in dice {
        let mut row = vec![Cell::new(&user.to_string())];
        row.extend(
            dice.iter()
                .map(|computer| Cell::new(&format_cell(user, computer))),
        );
        table.add_row(Row::new(row));
    }

    format!("{TABLE_TITLE}\n{}", table.to_string().trim_end())
}
