//! Wizard roster
//!
//! A wizard decides starting lives, how fast power points are earned and
//! which powerup they buy. Color is presentation only.

use super::Hue;

/// Powerup a wizard can cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    None,
    Shield,
    Heal,
    RevealWord,
    RevealLetters,
}

impl PowerupKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerupKind::None => "None",
            PowerupKind::Shield => "Shield",
            PowerupKind::Heal => "Heal",
            PowerupKind::RevealWord => "Reveal Word",
            PowerupKind::RevealLetters => "Reveal Letters",
        }
    }
}

/// Immutable character card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    pub name: &'static str,
    pub color: Hue,
    pub starting_lives: i32,
    /// Combo multiple that earns a power point, if any.
    pub combo_requirement: Option<u32>,
    pub powerup: PowerupKind,
    pub description: &'static str,
    pub art: &'static str,
}

impl Wizard {
    pub fn has_powerup(&self) -> bool {
        self.powerup != PowerupKind::None
    }
}

const WHITE_ART: &str = r#"
      /\
     /  \
    |    |
   /~~~~~~\
    (o  o)
     \__/
    /|  |\
"#;

const RED_ART: &str = r#"
      /\   *
     /**\
    |    |
   /~~~~~~\
    (>  <)
     \~~/
    /|##|\
"#;

const BLUE_ART: &str = r#"
      /\
     /  \  [#]
    |    |
   /~~~~~~\
    (-  -)
     \__/
    /|[]|\
"#;

const GREEN_ART: &str = r#"
      /\   ?
     /  \
    |~~~~|
   /~~~~~~\
    (o  O)
     \__/
    /|..|\
"#;

const YELLOW_ART: &str = r#"
      /\  ***
     /  \
    |    |
   /~~~~~~\
    (*  *)
     \__/
    /|::|\
"#;

pub const WHITE_WIZARD: Wizard = Wizard {
    name: "White Wizard",
    color: Hue::White,
    starting_lives: 5,
    combo_requirement: None,
    powerup: PowerupKind::None,
    description: "Extra lives, no magic.",
    art: WHITE_ART,
};

/// Every selectable wizard, in menu order.
pub static WIZARDS: [Wizard; 5] = [
    WHITE_WIZARD,
    Wizard {
        name: "Red Wizard",
        color: Hue::Red,
        starting_lives: 4,
        combo_requirement: Some(3),
        powerup: PowerupKind::Heal,
        description: "Restores one life.",
        art: RED_ART,
    },
    Wizard {
        name: "Blue Wizard",
        color: Hue::Blue,
        starting_lives: 4,
        combo_requirement: Some(3),
        powerup: PowerupKind::Shield,
        description: "Two wrong guesses cost nothing.",
        art: BLUE_ART,
    },
    Wizard {
        name: "Green Wizard",
        color: Hue::Green,
        starting_lives: 3,
        combo_requirement: Some(4),
        powerup: PowerupKind::RevealWord,
        description: "Reveals one hidden word.",
        art: GREEN_ART,
    },
    Wizard {
        name: "Yellow Wizard",
        color: Hue::Yellow,
        starting_lives: 3,
        combo_requirement: Some(3),
        powerup: PowerupKind::RevealLetters,
        description: "Reveals five to eight hidden letters.",
        art: YELLOW_ART,
    },
];
