use std::fmt;
use std::ops::Range;

use uuid::Uuid;

/// Level assigned at login.
pub const LEVEL_RANGE: Range<u32> = 1..51;
/// Experience assigned at login.
pub const EXPERIENCE_RANGE: Range<u32> = 0..1000;
/// Gold assigned at login.
pub const CURRENCY_RANGE: Range<u32> = 100..600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClass {
    BlogWarrior,
    MysticScribe,
    ShadowWriter,
    ArcaneBlogger,
    KnightOfPosts,
}

impl HeroClass {
    pub const ALL: [HeroClass; 5] = [
        HeroClass::BlogWarrior,
        HeroClass::MysticScribe,
        HeroClass::ShadowWriter,
        HeroClass::ArcaneBlogger,
        HeroClass::KnightOfPosts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HeroClass::BlogWarrior => "Blog Warrior",
            HeroClass::MysticScribe => "Mystic Scribe",
            HeroClass::ShadowWriter => "Shadow Writer",
            HeroClass::ArcaneBlogger => "Arcane Blogger",
            HeroClass::KnightOfPosts => "Knight of Posts",
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of the random stats handed out at login.
pub trait StatRoller: Send {
    /// Draw a value from `range`. `range` is never empty.
    fn roll(&mut self, range: Range<u32>) -> u32;
}

/// Draws from the entropy of freshly generated v4 UUIDs.
#[derive(Debug, Default)]
pub struct EntropyRoller;

impl StatRoller for EntropyRoller {
    fn roll(&mut self, range: Range<u32>) -> u32 {
        let span = u128::from(range.end - range.start);
        range.start + (Uuid::new_v4().as_u128() % span) as u32
    }
}

/// A logged-in hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub level: u32,
    pub class: HeroClass,
    pub experience: u32,
    pub currency: u32,
}

impl Identity {
    /// Build a complete identity for `name` with freshly rolled stats.
    pub fn generate(name: impl Into<String>, roller: &mut dyn StatRoller) -> Self {
        let class_index = draw(roller, 0..HeroClass::ALL.len() as u32) as usize;
        Self {
            name: name.into(),
            level: draw(roller, LEVEL_RANGE),
            class: HeroClass::ALL[class_index],
            experience: draw(roller, EXPERIENCE_RANGE),
            currency: draw(roller, CURRENCY_RANGE),
        }
    }
}

// Rollers are pluggable; keep whatever they return inside the range.
fn draw(roller: &mut dyn StatRoller, range: Range<u32>) -> u32 {
    let (low, high) = (range.start, range.end - 1);
    roller.roll(range).clamp(low, high)
}

/// Authentication state. An identity exists exactly when authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Authenticated(identity) => Some(identity),
            Session::Anonymous => None,
        }
    }
}
